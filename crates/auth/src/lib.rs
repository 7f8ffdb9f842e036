pub mod error;
pub mod guard;
pub mod jwt;
pub mod password;
pub mod service;

pub use error::{AuthError, Result};
pub use guard::AccessGuard;
pub use jwt::{Claims, JwtService};
pub use password::PasswordHasher;
pub use service::{CredentialService, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
