//! Remote data sets required by the IRI-2016 model.
//!
//! Each entry names one downloadable resource and the subdirectory of a data
//! root it belongs in. Archives are unpacked there, plain index files are
//! stored as fetched.

use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::types::ResourceLocator;

/// One remote resource and where it lives under a data root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dataset {
    /// Short identifier, unique within the catalog.
    pub name: &'static str,

    /// Directory URL the file is served from.
    pub base_url: &'static str,

    /// Remote file name.
    pub file_name: &'static str,

    /// Destination relative to the data root.
    pub subdir: &'static str,
}

impl Dataset {
    /// Builds the locator for this data set.
    ///
    /// # Errors
    ///
    /// Returns `RetrieveError::PathSecurity` if `file_name` is not a plain
    /// file name.
    pub fn locator(&self) -> Result<ResourceLocator> {
        ResourceLocator::new(self.base_url, self.file_name)
    }

    /// Returns the destination directory under `data_root`.
    #[must_use]
    pub fn directory(&self, data_root: &Path) -> PathBuf {
        data_root.join(self.subdir)
    }
}

/// Resources fetched by a full IRI-2016 setup.
pub const IRI2016_DATASETS: &[Dataset] = &[
    Dataset {
        name: "iri2016-source",
        base_url: "https://irimodel.org/IRI-2016",
        file_name: "00_iri.tar",
        subdir: "source",
    },
    Dataset {
        name: "common-files",
        base_url: "https://irimodel.org/COMMON_FILES",
        file_name: "00_ccir-ursi.tar",
        subdir: "data/common",
    },
    Dataset {
        name: "apf107",
        base_url: "https://chain-new.chain-project.net/echaim_downloads",
        file_name: "apf107.dat",
        subdir: "data/index",
    },
    Dataset {
        name: "ig-rz",
        base_url: "https://chain-new.chain-project.net/echaim_downloads",
        file_name: "ig_rz.dat",
        subdir: "data/index",
    },
];

/// Looks up a data set by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Dataset> {
    IRI2016_DATASETS.iter().find(|d| d.name == name)
}
