// feed encoded requests to the plugin binary and decode what it writes back
use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use prost::Message;
use prost_types::compiler::{CodeGeneratorRequest, CodeGeneratorResponse};
use prost_types::{
    DescriptorProto, FileDescriptorProto, MethodDescriptorProto, ServiceDescriptorProto,
};
use tempfile::tempdir;

fn plugin() -> Command { Command::new(assert_cmd::cargo::cargo_bin!("protoc-gen-twirp-swift")) }

fn create_request(parameter: Option<&str>, server_streaming: bool) -> CodeGeneratorRequest {
    let message = |n: &str| DescriptorProto { name: Some(n.into()), ..Default::default() };
    let file = FileDescriptorProto {
        name: Some("signal/signal.proto".into()),
        package: Some("stream.video.sfu.signal".into()),
        message_type: vec![message("SetPublisherRequest"), message("SetPublisherResponse")],
        service: vec![ServiceDescriptorProto {
            name: Some("SignalServer".into()),
            method: vec![MethodDescriptorProto {
                name: Some("SetPublisher".into()),
                input_type: Some(".stream.video.sfu.signal.SetPublisherRequest".into()),
                output_type: Some(".stream.video.sfu.signal.SetPublisherResponse".into()),
                server_streaming: Some(server_streaming),
                ..Default::default()
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    CodeGeneratorRequest {
        file_to_generate: vec!["signal/signal.proto".into()],
        parameter: parameter.map(Into::into),
        proto_file: vec![file],
        ..Default::default()
    }
}

fn decode(stdout: &[u8]) -> CodeGeneratorResponse {
    CodeGeneratorResponse::decode(stdout).expect("stdout should hold a response")
}

#[test]
fn generates_stub_and_models() {
    let output = plugin()
        .write_stdin(create_request(None, false).encode_to_vec())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let response = decode(&output);
    assert_eq!(response.error, None);
    let names: Vec<&str> = response.file.iter().map(|f| f.name()).collect();
    assert_eq!(
        names,
        vec!["signal/stream.video.sfu.signal.signal.twirp.swift", "signal/signal.model.swift"]
    );
    assert!(response.file[0].content().contains("public struct Stream_Video_Sfu_Signal_SignalServer {"));
}

#[test]
fn honours_parameters() {
    let output = plugin()
        .write_stdin(create_request(Some("ext=swiftgen,models=false"), false).encode_to_vec())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let response = decode(&output);
    assert_eq!(response.file.len(), 1);
    assert_eq!(response.file[0].name(), "signal/stream.video.sfu.signal.signal.twirp.swiftgen");
}

#[test]
fn reports_render_errors_in_response() {
    let output = plugin()
        .write_stdin(create_request(None, true).encode_to_vec())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let response = decode(&output);
    assert!(response.file.is_empty());
    assert!(response.error().contains("streaming method stream.video.sfu.signal.SignalServer.SetPublisher"));
}

#[test]
fn fails_on_malformed_parameter() {
    plugin()
        .write_stdin(create_request(Some("a=1,b"), false).encode_to_vec())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("malformed parameter `b`"));
}

#[test]
fn fails_on_empty_request() {
    plugin()
        .write_stdin(Vec::new())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no files to generate"));
}

#[test]
fn fails_on_undecodable_input() {
    let tmp = tempdir().expect("create temp dir");
    let input = tmp.path().join("garbage.bin");
    fs::write(&input, [0xff, 0xff, 0xff]).expect("write input");

    plugin()
        .pipe_stdin(&input)
        .expect("open stdin file")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to decode request"));
}
