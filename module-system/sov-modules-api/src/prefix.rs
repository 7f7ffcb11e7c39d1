// separator == "/"
const DOMAIN_SEPARATOR: [u8; 1] = [47];

/// Names one state variable of a module: `module_path/module_name/storage_name/`.
#[derive(Debug, PartialEq, Eq)]
pub struct Prefix {
    module_path: &'static str,
    module_name: &'static str,
    storage_name: &'static str,
}

impl Prefix {
    pub fn new_storage(
        module_path: &'static str,
        module_name: &'static str,
        storage_name: &'static str,
    ) -> Self {
        Self {
            module_path,
            module_name,
            storage_name,
        }
    }

    fn combine_prefix(&self) -> Vec<u8> {
        let parts = [self.module_path, self.module_name, self.storage_name];
        let len = parts
            .iter()
            .map(|part| part.len() + DOMAIN_SEPARATOR.len())
            .sum();

        let mut combined_prefix = Vec::with_capacity(len);
        for part in parts {
            combined_prefix.extend(part.as_bytes());
            combined_prefix.extend(DOMAIN_SEPARATOR);
        }
        combined_prefix
    }
}

impl From<Prefix> for sov_state::Prefix {
    fn from(prefix: Prefix) -> Self {
        sov_state::Prefix::new(prefix.combine_prefix())
    }
}
