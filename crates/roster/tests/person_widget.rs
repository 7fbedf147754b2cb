//! End-to-end behavior of the people widget over in-memory surfaces.

use roster::{
    HttpMethod, Operation, Person, PersonRow, RequestBody, INVALID_USERNAME_MESSAGE,
};
use roster_test::{describe_and_assert, Harness, DEFAULT_URL};
use serde_json::json;

fn person(id: u64, username: &str) -> Person {
    Person::new(id, username).expect("valid person")
}

#[test]
fn test_constructor() {
    describe_and_assert("constructor", Harness::new, |s| {
        s.it("makes the url available", |h| {
            assert_eq!(h.widget().base_url(), DEFAULT_URL);
        });

        s.it("starts with nothing rendered or sent", |h| {
            assert!(h.row_ids().is_empty());
            h.assert_no_requests();
        });
    });
}

#[test]
fn test_submit_new_person() {
    describe_and_assert("submitNewPerson", Harness::new, |s| {
        s.it("shows the validation message when input is empty", |h| {
            assert!(h.submit().is_err());
            assert_eq!(h.error_text(), INVALID_USERNAME_MESSAGE);
        });

        s.it("treats whitespace as empty", |h| {
            h.type_username(" \t ");
            assert!(h.submit().is_err());
            assert_eq!(h.error_text(), INVALID_USERNAME_MESSAGE);
            h.assert_no_requests();
        });

        s.it("does not post when input is not valid", |h| {
            h.type_username("");
            let _ = h.submit();
            h.assert_no_requests();
        });

        s.it("shows no message when input is valid", |h| {
            h.type_username("foobar");
            assert!(h.submit().is_ok());
            assert_eq!(h.error_text(), "");
        });

        s.it("clears a previous message when input is valid", |h| {
            let _ = h.submit();
            assert_eq!(h.error_text(), INVALID_USERNAME_MESSAGE);
            h.type_username("foobar");
            assert!(h.submit().is_ok());
            assert_eq!(h.error_text(), "");
        });

        s.it("posts the raw username", |h| {
            h.type_username("  foobar ");
            assert!(h.submit().is_ok());
            let sent = h.requests();
            assert_eq!(sent.len(), 1);
            let body = sent[0].body.as_ref().expect("create has a body");
            assert_eq!(body.form_field("username"), Some("  foobar "));
        });
    });
}

#[test]
fn test_create_person() {
    describe_and_assert("createPerson", Harness::new, |s| {
        s.it("posts to the collection url", |h| {
            h.widget().create_person("foo");
            let request = h.transport().last_request().expect("request sent");
            assert_eq!(request.method, HttpMethod::Post);
            assert_eq!(request.url, DEFAULT_URL);
        });

        s.it("posts a single form field", |h| {
            h.widget().create_person("foo");
            let request = h.transport().last_request().expect("request sent");
            assert_eq!(
                request.body,
                Some(RequestBody::Form(vec![(
                    "username".to_string(),
                    "foo".to_string()
                )]))
            );
        });

        s.it("renders the person the server returns", |h| {
            h.type_username("blahblah");
            h.widget().create_person("done");
            h.respond_json(&json!({"id": 1, "username": "done"}));
            h.assert_row(1u64, "1", "done");
            assert_eq!(h.username_value(), "");
        });

        s.it("leaves the input alone until the response arrives", |h| {
            h.type_username("pending");
            assert!(h.submit().is_ok());
            assert_eq!(h.username_value(), "pending");
            assert!(h.row_ids().is_empty());
        });

        s.it("reports a rejected create and keeps the input", |h| {
            h.type_username("dup");
            assert!(h.submit().is_ok());
            h.respond(409, "");
            assert!(h.row_ids().is_empty());
            assert_eq!(h.username_value(), "dup");
            let failures = h.failures();
            assert_eq!(failures.len(), 1);
            assert_eq!(failures[0].0, Operation::Create);
            assert!(failures[0].1.contains("409"));
        });

        s.it("reports a body without an id", |h| {
            h.widget().create_person("foo");
            h.respond_json(&json!({"username": "foo"}));
            assert!(h.row_ids().is_empty());
            assert_eq!(h.failures()[0].0, Operation::Create);
        });
    });

    describe_and_assert("createPerson with JSON bodies", Harness::json, |s| {
        s.it("sends a JSON object", |h| {
            h.widget().create_person("foo");
            let request = h.transport().last_request().expect("request sent");
            match request.body {
                Some(RequestBody::Json(text)) => {
                    let value: serde_json::Value =
                        serde_json::from_str(&text).expect("valid JSON");
                    assert_eq!(value, json!({"username": "foo"}));
                }
                other => panic!("expected a JSON body, got {other:?}"),
            }
        });
    });
}

#[test]
fn test_render_person() {
    describe_and_assert("renderPerson", Harness::new, |s| {
        s.it("adds a row with the person's element id", |h| {
            h.widget().render_person(&person(9999, "foo"));
            assert_eq!(h.row_ids(), vec!["person_9999".to_string()]);
        });

        s.it("fills the id, username and delete cells", |h| {
            h.widget().render_person(&person(9999, "foo"));
            h.assert_row(9999u64, "9999", "foo");
        });

        s.it("produces the expected markup", |h| {
            h.widget().render_person(&person(9999, "foo"));
            assert_eq!(
                h.rows().to_html(),
                "<tr id=\"person_9999\"><td>9999</td><td>foo</td>\
                 <td><a href=\"#\" data-person-id=\"9999\">delete</a></td></tr>"
            );
        });

        s.it("escapes markup in usernames", |h| {
            h.widget().render_person(&person(1, "<b>x</b>"));
            assert!(h.rows().to_html().contains("<td>&lt;b&gt;x&lt;/b&gt;</td>"));
            h.assert_row(1u64, "1", "<b>x</b>");
        });

        s.it("appends duplicates", |h| {
            h.widget().render_person(&person(3, "a"));
            h.widget().render_person(&person(3, "a"));
            assert_eq!(h.rows().count("person_3"), 2);
        });

        s.it("sends nothing", |h| {
            h.widget().render_person(&person(1, "a"));
            h.assert_no_requests();
        });
    });
}

#[test]
fn test_render_people() {
    describe_and_assert("renderPeople", Harness::new, |s| {
        s.it("renders each person in order", |h| {
            h.widget()
                .render_people(&[person(1, "foo"), person(2, "bar")]);
            assert_eq!(h.row_ids(), vec!["person_1", "person_2"]);
        });

        s.it("does nothing for an empty list", |h| {
            h.widget().render_people(&[]);
            assert!(h.row_ids().is_empty());
        });
    });
}

#[test]
fn test_fetch_all_people() {
    describe_and_assert("fetchAllPeople", Harness::new, |s| {
        s.it("gets the collection url", |h| {
            h.widget().fetch_all_people();
            let request = h.transport().last_request().expect("request sent");
            assert_eq!(request.method, HttpMethod::Get);
            assert_eq!(request.url, DEFAULT_URL);
            assert_eq!(request.body, None);
        });

        s.it("renders the response in order", |h| {
            h.widget().fetch_all_people();
            h.respond_json(&json!([
                {"id": 1, "username": "foo"},
                {"id": 2, "username": "bar"}
            ]));
            assert_eq!(h.row_ids(), vec!["person_1", "person_2"]);
            h.assert_row(2u64, "2", "bar");
            h.assert_no_failures();
        });

        s.it("keeps existing rows", |h| {
            h.widget().render_person(&person(7, "old"));
            h.widget().fetch_all_people();
            h.respond_json(&json!([{"id": 1, "username": "foo"}]));
            assert_eq!(h.row_ids(), vec!["person_7", "person_1"]);
        });

        s.it("accepts an empty list", |h| {
            h.widget().fetch_all_people();
            h.respond_json(&json!([]));
            assert!(h.row_ids().is_empty());
            h.assert_no_failures();
        });

        s.it("reports a body that is not a list", |h| {
            h.widget().fetch_all_people();
            h.respond_json(&json!({"some": "data"}));
            assert!(h.row_ids().is_empty());
            assert_eq!(h.failures()[0].0, Operation::List);
        });

        s.it("renders nothing when one entry is malformed", |h| {
            h.widget().fetch_all_people();
            h.respond_json(&json!([{"id": 1, "username": "ok"}, {"id": 2}]));
            assert!(h.row_ids().is_empty());
            assert_eq!(h.failures().len(), 1);
        });

        s.it("reports a network failure", |h| {
            h.widget().fetch_all_people();
            h.fail_network("connection refused");
            assert_eq!(h.failures()[0].0, Operation::List);
            assert!(h.failures()[0].1.contains("connection refused"));
        });
    });
}

#[test]
fn test_remove_person() {
    describe_and_assert("removePerson", Harness::new, |s| {
        s.it("deletes the person's url", |h| {
            h.widget().remove_person(&1234u64.into());
            let request = h.transport().last_request().expect("request sent");
            assert_eq!(request.method, HttpMethod::Delete);
            assert_eq!(request.url, "http://localhost:8000/people/1234");
            assert_eq!(request.body, None);
        });

        s.it("accepts text ids", |h| {
            h.widget().remove_person(&"abc".into());
            let request = h.transport().last_request().expect("request sent");
            assert_eq!(request.url, "http://localhost:8000/people/abc");
        });

        s.it("removes only the matching row on success", |h| {
            h.rows().insert_static_row(PersonRow::for_person(&person(1234, "a")));
            h.rows().insert_static_row(PersonRow::for_person(&person(5678, "b")));
            h.widget().remove_person(&1234u64.into());
            assert_eq!(h.row_ids().len(), 2);
            h.respond(200, "");
            assert_eq!(h.row_ids(), vec!["person_5678"]);
        });

        s.it("ignores a missing row", |h| {
            h.rows().insert_static_row(PersonRow::for_person(&person(1234, "a")));
            h.rows().insert_static_row(PersonRow::for_person(&person(5678, "b")));
            h.widget().remove_person(&9999u64.into());
            h.respond(204, "");
            assert_eq!(h.row_ids().len(), 2);
            h.assert_no_failures();
        });

        s.it("removes every duplicate row", |h| {
            h.widget().render_person(&person(3, "a"));
            h.widget().render_person(&person(3, "a"));
            h.widget().remove_person(&3u64.into());
            h.respond(204, "");
            assert!(h.row_ids().is_empty());
        });

        s.it("keeps the row when the server refuses", |h| {
            h.widget().render_person(&person(3, "a"));
            h.widget().remove_person(&3u64.into());
            h.respond(500, "");
            assert_eq!(h.row_ids(), vec!["person_3"]);
            let failures = h.failures();
            assert_eq!(failures[0].0, Operation::Delete);
            assert!(failures[0].1.contains("person 3"));
        });
    });

    describe_and_assert(
        "removePerson with a trailing slash",
        || Harness::with_url("http://localhost:8000/people/"),
        |s| {
            s.it("does not double the slash", |h| {
                h.widget().remove_person(&1u64.into());
                let request = h.transport().last_request().expect("request sent");
                assert_eq!(request.url, "http://localhost:8000/people/1");
            });
        },
    );
}

#[test]
fn test_delete_control() {
    describe_and_assert("delete control", Harness::new, |s| {
        s.it("deletes its own person", |h| {
            h.widget().render_person(&person(9999, "foo"));
            assert!(h.click_delete(9999u64));
            let request = h.transport().last_request().expect("request sent");
            assert_eq!(request.method, HttpMethod::Delete);
            assert_eq!(request.url, "http://localhost:8000/people/9999");
        });

        s.it("removes the row once the delete succeeds", |h| {
            h.widget().render_person(&person(1, "foo"));
            h.widget().render_person(&person(2, "bar"));
            assert!(h.click_delete(1u64));
            h.respond(204, "");
            assert_eq!(h.row_ids(), vec!["person_2"]);
        });

        s.it("works on rows from a fetch", |h| {
            h.widget().fetch_all_people();
            h.respond_json(&json!([{"id": 5, "username": "x"}]));
            assert!(h.click_delete(5u64));
            h.respond(204, "");
            assert!(h.row_ids().is_empty());
        });
    });
}

#[test]
fn test_out_of_order_completions() {
    describe_and_assert("concurrent requests", Harness::new, |s| {
        s.it("applies each completion to its own request", |h| {
            h.widget().create_person("first");
            h.widget().create_person("second");
            assert_eq!(h.transport().pending_len(), 2);

            h.transport().complete(
                1,
                Ok(roster::HttpResponse::ok(
                    json!({"id": 2, "username": "second"}).to_string(),
                )),
            );
            h.transport().complete(
                0,
                Ok(roster::HttpResponse::ok(
                    json!({"id": 1, "username": "first"}).to_string(),
                )),
            );

            assert_eq!(h.row_ids(), vec!["person_2", "person_1"]);
        });
    });
}
