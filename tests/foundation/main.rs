//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Value, ValueSet, Cardinality, Deprecation, and Error.

mod cardinality;
