/// Integration test target: the habit store over real storage backends
mod basic_integration;
