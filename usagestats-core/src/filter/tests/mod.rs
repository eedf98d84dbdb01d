mod request_filter_tests;
