//! Password hashing

use bcrypt::BcryptResult;

/// bcrypt with a configured cost
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> BcryptResult<String> {
        bcrypt::hash(password, self.cost)
    }

    pub fn verify(&self, password: &str, hash: &str) -> BcryptResult<bool> {
        bcrypt::verify(password, hash)
    }
}
