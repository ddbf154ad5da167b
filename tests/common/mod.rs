//! Shared CSV fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const BASIC_CSV: &str = "\
Plant_Name,Scientific_Name,Description,Medicinal_Value,References
Neem / Nimba,Azadirachta indica,Evergreen tree of the mahogany family.,Antibacterial,doi:10/neem
Tulsi,Ocimum tenuiflorum,Aromatic perennial herb.,Adaptogen,
";

pub const GENOME_CSV: &str = "\
Plant_Name,Scientific_Name,Nucleotide,Genome_Sequence,mRNA_Sequence,NCBI_link
Neem,Azadirachta indica,3402,2,118,https://www.ncbi.nlm.nih.gov/nuccore/?term=Azadirachta+indica
";

pub const TRANSCRIPT_CSV: &str = "\
Plant_Name,Scientific_Name,SRA,DNA,RNA,BioProject,BioSample
Tulsi,Ocimum tenuiflorum,40,3,37,1,12
";

pub const PHYTO_CSV: &str = "\
Plant_Name,Scientific_Name,Phytochemicals,Activity_Count,Plant_Part,References
Neem,Azadirachta indica,Nimbin,12,Leaf,IMPPAT
Neem,Azadirachta indica,Azadirachtin,30,Seed,IMPPAT
";

/// Writes the fixture tables into `<root>/data`. The classification and
/// proteome files are left out on purpose.
pub fn write_datasets(root: &Path) -> PathBuf {
    let data_dir = root.join("data");
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("basic_info.csv"), BASIC_CSV).unwrap();
    fs::write(data_dir.join("genome.csv"), GENOME_CSV).unwrap();
    fs::write(data_dir.join("trans.csv"), TRANSCRIPT_CSV).unwrap();
    fs::write(data_dir.join("phyto.csv"), PHYTO_CSV).unwrap();
    data_dir
}

/// Fixture tables plus a config file with the encyclopedia switched off.
pub fn setup_test_env(port: u16) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();
    let data_dir = write_datasets(&root);

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    let config_content = format!(
        r#"[data]
root = "{}"

[encyclopedia]
enabled = false

[server]
bind = "127.0.0.1:{}"
"#,
        data_dir.display(),
        port
    );

    let config_path = config_dir.join("mpmdb.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}
