mod reader_spec;
