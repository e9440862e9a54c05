pub mod currency;
pub mod lockbox;
pub mod signup;
