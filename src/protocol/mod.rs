pub mod zmtp;
