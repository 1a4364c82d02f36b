use flate2::{Compression, read::MultiGzDecoder, write::GzEncoder};
use gbff2tx::{
    Args, FileStats, GbffError, RowWriter, RunStats, convert, gbff2tx, process_block,
};
use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::{Path, PathBuf},
};
use tempfile::TempDir;

const DCD_ROW: &str = "NM_053283.2\tNCBI\tDCD\t62,395\t0,120;120,159;159,261;261,351;351,517";
const DDX11L1_ROW: &str = "NR_046018.2\tNCBI\tDDX11L1\t\t0,100;100,300";
const TXINFO_HEADER: &str = "ac\torigin\thgnc\tcds_se_i\texons_se_i";
const EXONSET_HEADER: &str = "tx_ac\talt_ac\tmethod\tstrand\texons_se_i";

struct Feature<'a> {
    kind: &'a str,
    location: &'a str,
    qualifiers: Vec<&'a str>,
}

fn feature<'a>(kind: &'a str, location: &'a str, qualifiers: &[&'a str]) -> Feature<'a> {
    Feature {
        kind,
        location,
        qualifiers: qualifiers.to_vec(),
    }
}

fn record(accession: &str, moltype: &str, len: usize, features: &[Feature]) -> String {
    let name = accession.split('.').next().unwrap();
    let mut out = format!(
        "LOCUS       {:<16}{:>12} bp    {:<8}linear   PRI 10-JUN-2013\n",
        name, len, moltype
    );
    out.push_str(&format!("DEFINITION  {} test transcript.\n", name));
    out.push_str(&format!("ACCESSION   {}\n", name));
    out.push_str(&format!("VERSION     {}\n", accession));
    out.push_str("FEATURES             Location/Qualifiers\n");
    for f in features {
        out.push_str(&format!("     {:<16}{}\n", f.kind, f.location));
        for q in &f.qualifiers {
            out.push_str(&format!("                     {}\n", q));
        }
    }
    out.push_str("ORIGIN      \n");
    let bases: Vec<u8> = b"acgt".iter().copied().cycle().take(len).collect();
    for (i, line) in bases.chunks(60).enumerate() {
        let groups: Vec<&str> = line
            .chunks(10)
            .map(|g| std::str::from_utf8(g).unwrap())
            .collect();
        out.push_str(&format!("{:>9} {}\n", i * 60 + 1, groups.join(" ")));
    }
    out.push_str("//\n");
    out
}

fn dcd() -> String {
    record(
        "NM_053283.2",
        "mRNA",
        517,
        &[
            feature("gene", "1..517", &["/gene=\"DCD\""]),
            feature("exon", "1..120", &["/gene=\"DCD\""]),
            feature("CDS", "63..395", &["/gene=\"DCD\"", "/codon_start=1"]),
            feature("exon", "121..159", &["/gene=\"DCD\""]),
            feature("exon", "160..261", &["/gene=\"DCD\""]),
            feature("exon", "262..351", &["/gene=\"DCD\""]),
            feature("exon", "352..517", &["/gene=\"DCD\""]),
        ],
    )
}

fn ddx11l1() -> String {
    record(
        "NR_046018.2",
        "RNA",
        300,
        &[
            feature("gene", "1..300", &["/gene=\"DDX11L1\""]),
            feature("exon", "1..100", &["/gene=\"DDX11L1\""]),
            feature("exon", "101..300", &["/gene=\"DDX11L1\""]),
        ],
    )
}

fn single_gene(accession: &str, symbol: &str) -> String {
    let qualifier = format!("/gene=\"{}\"", symbol);
    record(
        accession,
        "mRNA",
        120,
        &[
            feature("gene", "1..120", &[qualifier.as_str()]),
            feature("exon", "1..120", &[]),
        ],
    )
}

fn predicted() -> String {
    record(
        "XM_011520000.1",
        "mRNA",
        120,
        &[feature("gene", "1..120", &["/gene=\"LOC1\""])],
    )
}

fn write_gzip(path: &Path, content: &str) {
    let file = File::create(path)
        .unwrap_or_else(|e| panic!("failed to create gzip file {}: {}", path.display(), e));
    let mut writer = GzEncoder::new(BufWriter::new(file), Compression::default());

    writer
        .write_all(content.as_bytes())
        .unwrap_or_else(|e| panic!("failed to write gzip content {}: {}", path.display(), e));
    writer
        .finish()
        .unwrap_or_else(|e| panic!("failed to finish gzip file {}: {}", path.display(), e));
}

fn gz_fixture(root: &Path, name: &str, records: &[String]) -> PathBuf {
    let path = root.join(name);
    write_gzip(&path, &records.concat());
    path
}

fn read_gzip(path: &Path) -> String {
    let file = File::open(path)
        .unwrap_or_else(|e| panic!("failed to open {}: {}", path.display(), e));
    let mut text = String::new();
    MultiGzDecoder::new(file)
        .read_to_string(&mut text)
        .unwrap_or_else(|e| panic!("failed to read {}: {}", path.display(), e));
    text
}

fn run_files(files: &[PathBuf]) -> (gbff2tx::Result<RunStats>, Vec<String>) {
    let mut txinfo = RowWriter::txinfo(Vec::new()).unwrap();
    let result = convert(files, "NCBI", &mut txinfo, None);
    let text = String::from_utf8(txinfo.into_inner()).unwrap();

    (result, text.lines().map(str::to_string).collect())
}

#[test]
fn test_two_record_archive_round_trip() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let path = gz_fixture(temp.path(), "human.rna.gbff.gz", &[dcd(), ddx11l1()]);

    let (result, lines) = run_files(&[path]);
    let stats = result.unwrap();

    assert_eq!(lines, vec![TXINFO_HEADER, DCD_ROW, DDX11L1_ROW]);
    assert!(stats.skipped_ids.is_empty());
    assert_eq!(stats.prefixes.get("NM"), 1);
    assert_eq!(stats.prefixes.get("NR"), 1);
    assert_eq!(stats.written(), 2);
    assert_eq!(stats.total_genes.len(), 2);
}

#[test]
fn test_non_transcript_records_are_not_segmented() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let path = gz_fixture(temp.path(), "mixed.gbff.gz", &[predicted(), dcd()]);

    let (result, lines) = run_files(&[path]);
    let stats = result.unwrap();

    assert_eq!(lines, vec![TXINFO_HEADER, DCD_ROW]);
    assert_eq!(stats.prefixes.get("XM"), 0);
}

#[test]
fn test_filtered_prefix_is_counted_and_skipped() {
    let mut txinfo = RowWriter::txinfo(Vec::new()).unwrap();
    let mut file = FileStats::new(Path::new("direct"));
    let mut run = RunStats::default();

    let record = process_block(&predicted(), "NCBI", &mut txinfo, None, &mut file, &mut run)
        .expect("well-formed record");
    assert!(record.is_none());
    assert_eq!(txinfo.rows(), 0);

    run.fold(file);
    assert!(run.skipped_ids.contains("XM_011520000.1"));
    assert_eq!(run.prefixes.get("XM"), 1);
    assert!(run.total_genes.is_empty());
}

#[test]
fn test_gene_parity_across_files() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let a = gz_fixture(
        temp.path(),
        "a.gbff.gz",
        &[single_gene("NM_007294.4", "BRCA1"), dcd()],
    );
    let b = gz_fixture(temp.path(), "b.gbff.gz", &[dcd()]);
    let c = gz_fixture(
        temp.path(),
        "c.gbff.gz",
        &[single_gene("NM_007300.4", "BRCA1")],
    );

    let (result, _) = run_files(&[a.clone(), b]);
    let stats = result.unwrap();
    assert!(stats.total_genes.contains("BRCA1"));
    assert!(!stats.total_genes.contains("DCD"));
    assert_eq!(stats.files.len(), 2);
    assert_eq!(stats.files[0].genes.len(), 2);

    let (result, _) = run_files(&[a, c]);
    let stats = result.unwrap();
    assert!(!stats.total_genes.contains("BRCA1"));
    assert!(stats.total_genes.contains("DCD"));
}

#[test]
fn test_malformed_record_halts_processing() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let broken = record(
        "NM_000999.1",
        "mRNA",
        120,
        &[feature("gene", "1..120", &["/note=\"no symbol\""])],
    );
    let path = gz_fixture(temp.path(), "broken.gbff.gz", &[dcd(), broken, ddx11l1()]);

    let (result, lines) = run_files(&[path]);

    match result {
        Err(GbffError::MalformedRecord { locus, .. }) => assert_eq!(locus, "NM_000999.1"),
        other => panic!("expected a malformed record error, got {:?}", other),
    }
    assert_eq!(lines, vec![TXINFO_HEADER, DCD_ROW]);
}

#[test]
fn test_truncated_trailing_record_is_dropped() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let truncated = ddx11l1().trim_end_matches("//\n").to_string();
    let path = gz_fixture(temp.path(), "truncated.gbff.gz", &[dcd(), truncated]);

    let (result, lines) = run_files(&[path]);
    let stats = result.unwrap();

    assert_eq!(lines, vec![TXINFO_HEADER, DCD_ROW]);
    assert_eq!(stats.files[0].dropped, 1);
}

#[test]
fn test_missing_input_is_unreadable() {
    let temp = TempDir::new().expect("failed to create temporary directory");

    let (result, _) = run_files(&[temp.path().join("missing.gbff.gz")]);

    assert!(matches!(result, Err(GbffError::UnreadableInput { .. })));
}

#[test]
fn test_plain_text_input_is_unreadable() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let path = temp.path().join("plain.gbff.gz");
    std::fs::write(&path, dcd()).unwrap();

    let (result, _) = run_files(&[path]);

    assert!(matches!(result, Err(GbffError::UnreadableInput { .. })));
}

#[test]
fn test_outdir_writes_compressed_txinfo_and_exonset() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let input = gz_fixture(temp.path(), "human.rna.gbff.gz", &[dcd(), ddx11l1()]);
    let outdir = temp.path().join("out");

    let stats = gbff2tx(Args {
        files: vec![input],
        origin: "NCBI".to_string(),
        prefix: "release".to_string(),
        outdir: Some(outdir.clone()),
        compress: true,
        level: log::Level::Info,
    })
    .unwrap();
    assert_eq!(stats.written(), 2);

    let txinfo = read_gzip(&outdir.join("release.txinfo.gz"));
    assert_eq!(
        txinfo.lines().collect::<Vec<_>>(),
        vec![TXINFO_HEADER, DCD_ROW, DDX11L1_ROW]
    );

    let exonset = read_gzip(&outdir.join("release.exonset.gz"));
    assert_eq!(
        exonset.lines().collect::<Vec<_>>(),
        vec![
            EXONSET_HEADER,
            "NM_053283.2\tNM_053283.2\tNCBI\t1\t0,120;120,159;159,261;261,351;351,517",
            "NR_046018.2\tNR_046018.2\tNCBI\t1\t0,100;100,300",
        ]
    );
}

#[test]
fn test_outdir_without_compression_writes_plain_files() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let input = gz_fixture(temp.path(), "human.rna.gbff.gz", &[ddx11l1()]);
    let outdir = temp.path().join("plain");

    gbff2tx(Args {
        files: vec![input],
        origin: "RefSeq".to_string(),
        prefix: "ncbi-gbff".to_string(),
        outdir: Some(outdir.clone()),
        compress: false,
        level: log::Level::Info,
    })
    .unwrap();

    let txinfo = std::fs::read_to_string(outdir.join("ncbi-gbff.txinfo")).unwrap();
    assert_eq!(
        txinfo,
        format!(
            "{}\n{}\n",
            TXINFO_HEADER,
            DDX11L1_ROW.replace("NCBI", "RefSeq")
        )
    );
}

#[test]
fn test_stdout_mode_ignores_prefix() {
    let temp = TempDir::new().expect("failed to create temporary directory");
    let input = gz_fixture(temp.path(), "human.rna.gbff.gz", &[dcd(), ddx11l1()]);

    let stats = gbff2tx(Args {
        files: vec![input],
        origin: "NCBI".to_string(),
        prefix: "custom".to_string(),
        outdir: None,
        compress: false,
        level: log::Level::Info,
    })
    .unwrap();

    assert_eq!(stats.written(), 2);
    assert_eq!(stats.files.len(), 1);

    let created: Vec<_> = std::fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(created, vec![std::ffi::OsString::from("human.rna.gbff.gz")]);
    assert!(!Path::new("custom.txinfo").exists());
    assert!(!Path::new("custom.exonset").exists());
}
