pub const WELCOME: &str = "Welcome to the User Management API!";

pub async fn welcome() -> &'static str {
    WELCOME
}
