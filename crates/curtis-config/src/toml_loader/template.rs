//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# Curtis Configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[api]
# address = "https://example.com"   # required before the first request
# api_key = ""                      # sent as x-api-key when set
# connect_timeout = 10              # seconds
# generate_timeout = 30             # seconds
# stream_timeout = 120              # seconds without data

[chat]
# memory_length = 50                # 0-99, 0 disables history
# max_response_tokens = 275         # 50-500
# streaming = true

[image]
# seed = 2
# num_inference_steps = 2           # 1-50
# timeout = 120                     # seconds

[logging]
# level = "INFO"                    # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
