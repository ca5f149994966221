pub mod conf_process;

pub use self::conf_process::ProcessConf;
