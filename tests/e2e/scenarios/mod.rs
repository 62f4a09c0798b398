mod matrix_contract;

// Stubs are driven through `sh -c`
#[cfg(unix)]
mod outcomes;
