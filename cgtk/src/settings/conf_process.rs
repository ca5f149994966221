use std::fmt;
use serde_json;
use errors::Result;

#[derive(Deserialize, Clone)]
pub struct ProcessConf {
    // stop once no message would change a belief by more than `tol` (KL divergence)
    pub tol: f64,
    // at most `max_iter * #message paths` messages are passed
    pub max_iter: usize,
    // keep a copy of every passed message, for debugging small graphs
    #[serde(default)]
    pub keep_passed_messages: bool,
}

impl ProcessConf {
    pub fn default() -> ProcessConf {
        ProcessConf {
            tol: 1e-3,
            max_iter: 50,
            keep_passed_messages: false,
        }
    }

    pub fn from_json(content: &str) -> Result<ProcessConf> {
        Ok(serde_json::from_str(content)?)
    }
}

impl fmt::Debug for ProcessConf {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, r#"
        tol                  : {}
        max_iter             : {}
        keep_passed_messages : {}"#,
        self.tol,
        self.max_iter,
        self.keep_passed_messages)
    }
}
