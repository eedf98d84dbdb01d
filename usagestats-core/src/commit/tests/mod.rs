mod committer_tests;
