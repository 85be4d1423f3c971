//! End-to-end tests: spawn the fixterm binary against a scripted
//! counterparty and assert on the transcript and the wire traffic.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::codec::Framed;

use fixterm_wire::tags::{self, msg_type};
use fixterm_wire::{FixCodec, FixMessage, FixVersion};

/// Accept one session, acknowledge the Logon, and record the MsgType of
/// every message until the client goes away.
fn spawn_acceptor(listener: TcpListener) -> JoinHandle<Vec<String>> {
    tokio::spawn(async move {
        let (stream, _addr) = listener.accept().await.expect("accept");
        let mut framed = Framed::new(stream, FixCodec::new(FixVersion::Fix42));

        let mut seen = Vec::new();
        let mut acknowledged = false;
        while let Some(msg) = framed.next().await.transpose().expect("decode") {
            let msg_type = msg.msg_type().expect("MsgType").to_string();
            seen.push(msg_type.clone());

            if msg_type == msg_type::LOGON && !acknowledged {
                acknowledged = true;
                let ack = FixMessage::new()
                    .with_field(tags::MSG_TYPE, msg_type::LOGON)
                    .with_field(tags::MSG_SEQ_NUM, "1")
                    .with_field(tags::SENDER_COMP_ID, "ACCEPTOR")
                    .with_field(tags::TARGET_COMP_ID, "INITIATOR")
                    .with_field(tags::ENCRYPT_METHOD, "0")
                    .with_field(tags::HEART_BT_INT, "30");
                framed.send(ack).await.expect("send ack");
            }
        }
        seen
    })
}

fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    path
}

#[tokio::test]
async fn test_scripted_session_end_to_end() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    let acceptor = spawn_acceptor(listener);

    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(
        &dir,
        "fixterm.toml",
        &format!(
            r#"
[fix]
version = "FIX.4.2"
sender-comp-id = "INITIATOR"
target-comp-id = "ACCEPTOR"
heart-bt-int = 30
address = "127.0.0.1"
port = {port}
"#
        ),
    );
    let script_path = write_file(
        &dir,
        "script.txt",
        "# end-to-end exercise\n\
         help\n\
         send 35=D|55=TEST|44=10\n\
         wait A\n\
         bogus-cmd arg1\n\
         messages sent\n\
         exit\n",
    );

    let output = tokio::time::timeout(
        Duration::from_secs(30),
        tokio::process::Command::new(env!("CARGO_BIN_EXE_fixterm"))
            .arg(&config_path)
            .arg(&script_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output(),
    )
    .await
    .expect("client should terminate")
    .expect("client should run");

    assert!(output.status.success(), "exit status: {:?}", output.status);

    let transcript = String::from_utf8(output.stdout).unwrap();
    assert!(transcript.contains("< help"), "transcript: {transcript}");
    assert!(transcript.contains("Commands:"));
    assert!(transcript.contains("< send 35=D|55=TEST|44=10"));
    assert!(transcript.contains("error: Unknown command"));
    // Scripted runs do not print the interactive hint.
    assert!(!transcript.contains("Type 'help'"));
    // "messages sent" shows the stamped order with its sequence number.
    assert!(transcript.contains("35=D|34=2"), "transcript: {transcript}");

    let seen = tokio::time::timeout(Duration::from_secs(10), acceptor)
        .await
        .expect("acceptor should finish")
        .unwrap();
    assert_eq!(seen, [msg_type::LOGON, "D", msg_type::LOGOUT]);
}

#[tokio::test]
async fn test_wrong_argument_count_is_a_usage_error() {
    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_fixterm"))
        .stdin(Stdio::null())
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Usage: fixterm"));
}

#[tokio::test]
async fn test_missing_config_is_reported_non_zero() {
    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_fixterm"))
        .arg("/nonexistent/fixterm.toml")
        .stdin(Stdio::null())
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("error:"));
}

#[tokio::test]
async fn test_missing_script_file_is_reported_non_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = write_file(
        &dir,
        "fixterm.toml",
        r#"
[fix]
version = "FIX.4.2"
sender-comp-id = "A"
target-comp-id = "B"
heart-bt-int = 30
address = "127.0.0.1"
port = 1
"#,
    );

    let output = tokio::process::Command::new(env!("CARGO_BIN_EXE_fixterm"))
        .arg(&config_path)
        .arg(dir.path().join("no-such-script.txt"))
        .stdin(Stdio::null())
        .output()
        .await
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no such file"));
}
