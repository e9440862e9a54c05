pub mod calculator;
pub mod lockbox;
pub mod signup;
