pub mod session_authentication;
