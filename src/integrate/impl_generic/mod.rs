//! Generic implementations shared by every numr backend.

pub mod quadrature;
