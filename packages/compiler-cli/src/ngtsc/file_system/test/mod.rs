mod node_js_file_system_spec;
