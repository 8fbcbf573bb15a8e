/// Unit test harness
mod basic_tests;
