//! Authentication Module
//!
//! - **`sessions`** - JWT token generation and validation
//! - **`password`** - bcrypt hashing with the configured cost
//! - **`handlers`** - HTTP handlers for authentication endpoints
//!
//! # Authentication Flow
//!
//! 1. **Signup**: login, email and password → User created → JWT token returned
//! 2. **Login**: login (or email) and password → Credentials verified → JWT token returned
//! 3. **Get Me**: JWT token → Token verified → User returned
//!
//! Invalid credentials return 401 whether the user exists or not.

/// JWT token generation and validation
pub mod sessions;

/// Password hashing
pub mod password;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest};
pub use handlers::{get_me, login, signup};
pub use password::PasswordHasher;
pub use sessions::{Claims, SessionKeys};
