pub mod contact;
pub mod system;
