// Discrete
pub mod Poisson;

// Continuous
pub mod ChiSquared;
pub mod F;
pub mod Normal;
