use super::{InputFormat, summarise};

fn summary(format: InputFormat, input: &str) -> String {
    let mut output = Vec::new();
    summarise(&mut output, format, input).unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn a3m_summary() {
    assert_eq!(
        summary(InputFormat::A3m, ">query\nACDE\n>hit\nAgCkkDF\n"),
        "2 sequences\n4 columns\n3 deleted residues\n"
    );
}

#[test]
fn stockholm_summary() {
    let input = "# STOCKHOLM 1.0

#=GS query DE the query
query   AC-DE
hit1    ACkDE
//
";
    assert_eq!(
        summary(InputFormat::Sto, input),
        "2 sequences\n4 columns\n1 deleted residues\n1 sequences have a description\n"
    );
}

#[test]
fn fasta_summary() {
    assert_eq!(
        summary(InputFormat::Fasta, ">a first\nACDE\nFG\n>b\nA\n"),
        "2 records\na first: 6 residues\nb: 1 residues\n"
    );
}

#[test]
fn malformed_input_is_an_error() {
    let mut output = Vec::new();
    assert!(summarise(&mut output, InputFormat::Fasta, "ACDE\n").is_err());
}
