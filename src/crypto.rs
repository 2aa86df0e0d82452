mod errors;
pub mod sym;

pub use errors::Error;
pub use sym::{Cipher, IdentityCipher};
