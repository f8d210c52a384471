use crate::core::LookupMode;
use crate::utils::error::Result;

/// 課程檔案來源。開檔失敗必須回傳 `CatalogError::SourceUnavailable`。
pub trait CatalogSource {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
}

impl<T: CatalogSource + ?Sized> CatalogSource for &T {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        (**self).read_file(path)
    }
}

pub trait SettingsProvider {
    fn input_path(&self) -> &str;
    fn bucket_count(&self) -> usize;
    fn delimiter(&self) -> u8;
    fn lookup_mode(&self) -> LookupMode;
}

impl<T: SettingsProvider + ?Sized> SettingsProvider for &T {
    fn input_path(&self) -> &str {
        (**self).input_path()
    }

    fn bucket_count(&self) -> usize {
        (**self).bucket_count()
    }

    fn delimiter(&self) -> u8 {
        (**self).delimiter()
    }

    fn lookup_mode(&self) -> LookupMode {
        (**self).lookup_mode()
    }
}
