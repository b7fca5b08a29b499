//! Invite code generator backed by the operating system's randomness.

use rand::rngs::OsRng;

use crate::domain::InviteCode;
use crate::domain::ports::InviteCodeGenerator;

#[derive(Debug, Default, Clone, Copy)]
pub struct RandomInviteCodeGenerator;

impl InviteCodeGenerator for RandomInviteCodeGenerator {
    fn next_code(&self) -> InviteCode {
        InviteCode::generate(&mut OsRng)
    }
}
