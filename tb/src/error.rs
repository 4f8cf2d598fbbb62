use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("reading input file \"{path}\" failed: {source}")]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("compiling \"{path}\" failed: {source}")]
    Compile {
        path: PathBuf,
        #[source]
        source: karambit_basic::BasicError,
    },

    #[error("assembling \"{path}\" failed: {source}")]
    Assemble {
        path: PathBuf,
        #[source]
        source: karambit_asm::AssembleError,
    },

    #[error("execution failed: {source}")]
    Execution {
        #[source]
        source: karambit_vm::CpuError,
    },
}
