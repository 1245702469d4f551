mod core_test;
mod fixture;
