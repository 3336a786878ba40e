pub use super::turnstile_user::Entity as TurnstileUser;
