pub mod exa;
