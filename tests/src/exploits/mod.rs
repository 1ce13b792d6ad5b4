//! # Exploit-Style Tests
//!
//! Attack simulations against the system's known trust boundaries: the
//! purchase re-entrancy guard, and the by-convention-only storage
//! isolation between facets.

pub mod reentrancy;
