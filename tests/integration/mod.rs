/// Integration test harness
mod basic_integration;
