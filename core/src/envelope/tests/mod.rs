mod envelope_tests;
