pub mod codegen;
pub mod obfuscate;
