mod error_display_tests;
