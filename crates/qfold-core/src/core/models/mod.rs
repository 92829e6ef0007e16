pub mod contact;
pub mod frame;
