mod text_parser_unit_tests;
