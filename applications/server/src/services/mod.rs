/// Server services
pub mod accounts;
pub mod secret;
pub mod token;

pub use accounts::{AccountService, SigninInput, SignupInput};
pub use secret::SecretCodec;
pub use token::{TokenPair, TokenService, UserClaims};
