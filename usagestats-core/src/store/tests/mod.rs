mod jsonl_tests;
mod memory_tests;
