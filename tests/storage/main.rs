//! Integration tests for Layer 1: Storage
//!
//! Tests for object allocation, net-id assignment, the controller index, and lookups.

mod lifecycle;
