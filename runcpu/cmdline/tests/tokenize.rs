use rstest::rstest;
use runcpu_cmdline::{tokenize, Tokenized};

/// Position of the first unquoted `--`, computed independently from the tokenizer.
fn unquoted_separator(raw: &str) -> Option<usize> {
    let bytes = raw.as_bytes();
    let mut in_quote = false;

    for (index, &byte) in bytes.iter().enumerate() {
        match byte {
            b'"' => in_quote = !in_quote,
            b'-' if !in_quote && bytes.get(index + 1) == Some(&b'-') => return Some(index),
            _ => {}
        }
    }

    None
}

#[rstest]
#[case("runcpu -a 3 -- notepad.exe")]
#[case("runcpu -a 3 --notepad.exe")]
#[case("runcpu -a 3 --\t\r\n  cmd /c \"echo -- done\"")]
#[case("\"C:\\a b\\runcpu.exe\" -d \"x -- y\" -a ff -- \"C:\\Program Files\\app.exe\" --flag")]
#[case("runcpu -a 1 --")]
#[case("--")]
#[case("x---y")]
#[case("runcpu -a 1 -- привет мир")]
fn payload_is_the_raw_suffix(#[case] raw: &str) {
    let separator = unquoted_separator(raw).expect("test input has a separator");
    let Tokenized { payload, .. } = tokenize(raw);
    let payload = payload.expect("tokenizer found the separator");

    assert!(payload.offset() >= separator);
    assert_eq!(
        payload.as_str(),
        raw[separator + 2..].trim_start_matches([' ', '\t', '\r', '\n'])
    );
    assert_eq!(&raw[payload.offset()..], payload.as_str());
    assert!(std::ptr::eq(
        payload.as_str().as_ptr(),
        raw[payload.offset()..].as_ptr()
    ));
}

#[test]
fn arguments_stop_at_separator() {
    let Tokenized { arguments, payload } = tokenize("runcpu -a 3 -- -a 4 -d elsewhere");

    assert_eq!(arguments.iter().collect::<Vec<_>>(), ["runcpu", "-a", "3"]);
    assert_eq!(payload.map(|p| p.as_str()), Some("-a 4 -d elsewhere"));
}

#[test]
fn no_separator_no_payload() {
    let Tokenized { arguments, payload } = tokenize("runcpu -a 3 notepad.exe");

    assert_eq!(arguments.len(), 4);
    assert!(payload.is_none());
}
