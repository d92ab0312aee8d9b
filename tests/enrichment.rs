// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use logforth_enrich::append::Testing;
use logforth_enrich::event::LogEvent;
use logforth_enrich::layout::Layout;
use logforth_enrich::layout::PlainTextLayout;

#[test]
fn test_environment_variable_follows_process_environment() {
    let testing = Testing::default();
    let logger = logforth_enrich::builder()
        .with_environment("MY_VAR")
        .unwrap()
        .append(testing.clone())
        .build();

    unsafe { std::env::set_var("MY_VAR", "42") };
    logger.log(LogEvent::builder().message("first").build());

    unsafe { std::env::remove_var("MY_VAR") };
    logger.log(LogEvent::builder().message("second").build());

    let events = testing.take();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].property("MY_VAR").unwrap().to_string(), "42");
    assert!(events[1].property("MY_VAR").is_none());
}

#[test]
fn test_function_with_parameter_on_every_event() {
    let testing = Testing::default();
    let logger = logforth_enrich::builder()
        .with_function_parameter("Len", |s: &&str| Ok(s.len().to_string()), "hello")
        .unwrap()
        .append(testing.clone())
        .build();

    for message in ["a", "b", "c"] {
        logger.log(LogEvent::builder().message(message).build());
    }

    let events = testing.take();
    assert_eq!(events.len(), 3);
    for event in events {
        assert_eq!(event.property("Len").unwrap().to_string(), "5");
    }
}

#[test]
fn test_machine_name_reflects_current_value() {
    let variable = if cfg!(windows) {
        "COMPUTERNAME"
    } else {
        "HOSTNAME"
    };

    let testing = Testing::default();
    let logger = logforth_enrich::builder()
        .with_machine_name()
        .append(testing.clone())
        .build();

    unsafe { std::env::set_var(variable, "build-agent-7") };
    logger.log(LogEvent::builder().build());

    unsafe { std::env::set_var(variable, "build-agent-8") };
    logger.log(LogEvent::builder().build());

    let events = testing.take();
    assert_eq!(events[0].property("MachineName").unwrap().to_string(), "build-agent-7");
    assert_eq!(events[1].property("MachineName").unwrap().to_string(), "build-agent-8");
}

#[test]
fn test_user_name_reflects_current_value() {
    let testing = Testing::default();
    let logger = logforth_enrich::builder()
        .with_user_name()
        .append(testing.clone())
        .build();

    unsafe { std::env::set_var("UserName", "build-bot") };
    logger.log(LogEvent::builder().build());

    unsafe { std::env::remove_var("UserName") };
    logger.log(LogEvent::builder().build());

    let events = testing.take();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].property("UserName").unwrap().to_string(), "build-bot");
    assert!(events[1].property("UserName").is_none());
}

#[test]
fn test_enrichers_compose_into_rendered_output() {
    unsafe { std::env::set_var("LOGFORTH_ENRICH_E2E_REGION", "eu-west-1") };

    let testing = Testing::default();
    let logger = logforth_enrich::builder()
        .with_property("service", "checkout")
        .unwrap()
        .with_environment_as("LOGFORTH_ENRICH_E2E_REGION", "Region")
        .unwrap()
        .with_function_event("Level", |e| Ok(e.level().to_string()))
        .unwrap()
        .append(testing.clone())
        .build();

    logger.log(
        LogEvent::builder()
            .timestamp("2024-08-11T22:44:57Z".parse().unwrap())
            .level(log::Level::Error)
            .target("checkout::payment")
            .message("card declined")
            .property("service", "payments")
            .build(),
    );

    let events = testing.take();
    let bytes = PlainTextLayout::default().format(&events[0]).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    insta::assert_snapshot!(text, @"2024-08-11T22:44:57Z ERROR checkout::payment: card declined service=payments Region=eu-west-1 Level=ERROR");
}
