//! Short code generation

use rand::{distr::Alphanumeric, Rng};

/// Number of characters in every short code
pub const CODE_LENGTH: usize = 6;

/// Produces candidate short codes.
///
/// Implementations don't touch storage and make no uniqueness promise;
/// the store retries on collision.
pub trait CodeGenerator: Send + Sync + 'static {
    fn generate(&self) -> String;
}

/// Uniform random codes over `[A-Za-z0-9]`
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        rand::rng()
            .sample_iter(&Alphanumeric)
            .take(CODE_LENGTH)
            .map(char::from)
            .collect()
    }
}

/// Whether `code` has the shape of a generated short code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
