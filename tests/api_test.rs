//! HTTP-level tests: every route wired exactly as in production, over the
//! in-memory repositories.

use std::str::FromStr;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use bigdecimal::BigDecimal;
use serde_json::{json, Value};
use shop_service::domain::order::OrderNumber;
use shop_service::domain::order_number::OrderNumberGenerator;
use shop_service::{configure, ApiDoc, Services};
use utoipa::OpenApi;

fn services() -> Services {
    Services::in_memory(OrderNumberGenerator::default())
}

fn order_payload(user_id: &str, total: &str) -> Value {
    json!({
        "customer": {
            "userId": user_id,
            "username": "ayse",
            "email": "ayse@example.com",
            "phone": "+90 555 000 00 00"
        },
        "addresses": {
            "delivery": {
                "fullAddress": "Ataturk Cd. 1",
                "city": "Izmir",
                "district": "Konak",
                "postalCode": "35250",
                "country": "TR"
            }
        },
        "items": [{
            "productId": "p-1",
            "productName": "Dog leash",
            "quantity": 2,
            "unitPrice": "10.00"
        }],
        "pricing": {
            "subtotal": "20.00",
            "tax": "2.00",
            "shipping": "5.00",
            "discount": "0",
            "total": total
        },
        "payment": { "method": "credit_card" }
    })
}

fn decimal(value: &Value) -> BigDecimal {
    BigDecimal::from_str(value.as_str().expect("decimal serialized as string"))
        .expect("valid decimal")
}

macro_rules! app {
    ($services:expr) => {{
        let services = $services;
        test::init_service(App::new().configure(|cfg| configure(cfg, &services))).await
    }};
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn create_order_assigns_number_and_defaults() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_payload("user-1", "27.00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Order created successfully");
    let number = body["orderNumber"].as_str().unwrap();
    assert!(OrderNumber::is_well_formed(number), "bad number {number}");
    assert_eq!(body["orderId"], body["order"]["id"]);

    let order = &body["order"];
    assert_eq!(order["orderNumber"], number);
    assert_eq!(order["orderStatus"], "pending");
    assert_eq!(order["pricing"]["currency"], "TRY");
    assert_eq!(order["payment"]["status"], "pending");
    assert_eq!(order["isActive"], true);
    assert_eq!(order["isDeleted"], false);
    assert_eq!(decimal(&order["items"][0]["totalPrice"]), BigDecimal::from(20));
    assert_eq!(order["timeline"].as_array().unwrap().len(), 1);
    assert_eq!(order["timeline"][0]["note"], "order created");
    assert_eq!(order["createdAt"], order["updatedAt"]);
    assert_eq!(order["createdAt"], order["orderDate"]);
}

#[actix_web::test]
async fn wrong_total_is_rejected_and_nothing_is_stored() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_payload("user-1", "30.00"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "message": "Total price calculation is incorrect" })
    );

    let req = test::TestRequest::get().uri("/orders").to_request();
    let orders: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(orders, json!([]));
}

#[actix_web::test]
async fn missing_sections_are_reported_in_order() {
    let app = app!(services());

    let mut payload = order_payload("user-1", "27.00");
    payload.as_object_mut().unwrap().remove("customer");
    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Customer information is required");

    let mut payload = order_payload("user-1", "27.00");
    payload["items"][0]["quantity"] = json!(0);
    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(&payload)
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Product quantity must be greater than zero");
}

#[actix_web::test]
async fn numeric_prices_are_validated_exactly() {
    let app = app!(services());

    let mut payload = order_payload("user-1", "0");
    payload["items"] = json!([{ "productId": "p-1", "quantity": 3, "unitPrice": 10.1 }]);
    payload["pricing"] = json!({
        "subtotal": 30.3,
        "tax": 0.1,
        "shipping": 0,
        "discount": 0.2,
        "total": 30.2
    });
    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(&payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let order = &body["order"];
    assert_eq!(order["items"][0]["unitPrice"], "10.1");
    assert_eq!(decimal(&order["items"][0]["totalPrice"]), decimal(&json!("30.3")));
    assert_eq!(order["pricing"]["total"], "30.2");
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/orders")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[actix_web::test]
async fn lookups_by_id_and_number() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_payload("user-1", "27.00"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["orderId"].as_str().unwrap().to_string();
    let number = created["orderNumber"].as_str().unwrap().to_string();

    let first = test::call_and_read_body(
        &app,
        test::TestRequest::get().uri(&format!("/orders/{id}")).to_request(),
    )
    .await;
    let second = test::call_and_read_body(
        &app,
        test::TestRequest::get().uri(&format!("/orders/{id}")).to_request(),
    )
    .await;
    assert_eq!(first, second);

    let req = test::TestRequest::get()
        .uri(&format!("/orders/number/{number}"))
        .to_request();
    let by_number: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(by_number["id"], id.as_str());

    for uri in [
        "/orders/00000000-0000-0000-0000-000000000000".to_string(),
        "/orders/not-a-uuid".to_string(),
        "/orders/number/SP-20000101-000000".to_string(),
    ] {
        let resp = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{uri}");
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Order not found" }));
    }
}

#[actix_web::test]
async fn status_updates_append_to_timeline_without_restrictions() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_payload("user-1", "27.00"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["orderId"].as_str().unwrap().to_string();
    let status_uri = format!("/orders/{id}/status");

    let req = test::TestRequest::put()
        .uri(&status_uri)
        .set_json(json!({ "status": "shipped", "note": "handed to carrier" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Order status updated to shipped" }));

    let req = test::TestRequest::put()
        .uri(&status_uri)
        .set_json(json!({ "status": "PENDING" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&status_uri)
        .set_json(json!({ "status": "returned" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&status_uri)
        .set_json(json!({ "status": "  " }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "New status is required");

    let req = test::TestRequest::get().uri(&format!("/orders/{id}")).to_request();
    let order: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(order["orderStatus"], "pending");
    let timeline = order["timeline"].as_array().unwrap();
    let statuses: Vec<_> = timeline.iter().map(|e| e["status"].clone()).collect();
    assert_eq!(statuses, vec![json!("pending"), json!("shipped"), json!("pending")]);
    assert_eq!(timeline[1]["note"], "handed to carrier");
    assert_eq!(timeline[2]["note"], "Order status updated to pending");
    assert_eq!(order["updatedAt"], timeline[2]["date"]);

    let req = test::TestRequest::put()
        .uri("/orders/00000000-0000-0000-0000-000000000000/status")
        .set_json(json!({ "status": "confirmed" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn soft_deleted_orders_disappear() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/orders")
        .set_json(order_payload("user-1", "27.00"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    let id = created["orderId"].as_str().unwrap().to_string();
    let number = created["orderNumber"].as_str().unwrap().to_string();

    let req = test::TestRequest::delete()
        .uri(&format!("/orders/{id}"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Order deleted successfully");

    for req in [
        test::TestRequest::get().uri(&format!("/orders/{id}")).to_request(),
        test::TestRequest::get()
            .uri(&format!("/orders/number/{number}"))
            .to_request(),
        test::TestRequest::put()
            .uri(&format!("/orders/{id}/status"))
            .set_json(json!({ "status": "confirmed" }))
            .to_request(),
        test::TestRequest::delete()
            .uri(&format!("/orders/{id}"))
            .to_request(),
    ] {
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::NOT_FOUND
        );
    }

    let req = test::TestRequest::get().uri("/orders/user/user-1").to_request();
    let orders: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(orders, json!([]));
}

#[actix_web::test]
async fn user_orders_are_filtered_and_newest_first() {
    let app = app!(services());

    let mut ids = Vec::new();
    for user in ["user-1", "user-2", "user-1"] {
        let req = test::TestRequest::post()
            .uri("/orders")
            .set_json(order_payload(user, "27.00"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(created["orderId"].clone());
    }

    let req = test::TestRequest::get().uri("/orders/user/user-1").to_request();
    let orders: Value = test::call_and_read_body_json(&app, req).await;
    let got: Vec<_> = orders
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["id"].clone())
        .collect();
    assert_eq!(got, vec![ids[2].clone(), ids[0].clone()]);

    let req = test::TestRequest::get().uri("/orders").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let req = test::TestRequest::get().uri("/orders/user/%20").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

// ── Products ─────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn product_crud() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/products")
        .set_json(json!({
            "name": "Cat tree",
            "description": "Three levels",
            "image": "cat-tree.png",
            "price": "200",
            "discountPercentage": "25"
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["message"], "Product added successfully");
    assert_eq!(
        decimal(&created["product"]["discountedPrice"]),
        BigDecimal::from(150)
    );
    let id = created["product"]["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::put()
        .uri(&format!("/products/{id}"))
        .set_json(json!({
            "name": "Cat tower",
            "description": "Four levels",
            "image": "cat-tower.png",
            "price": "300",
            "discountPercentage": "150"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/products/{id}"))
        .to_request();
    let product: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(product["name"], "Cat tower");
    assert_eq!(decimal(&product["discountPercentage"]), BigDecimal::from(100));
    assert_eq!(decimal(&product["discountedPrice"]), BigDecimal::from(0));

    let req = test::TestRequest::delete()
        .uri(&format!("/products/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/products/{id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn discounted_price_is_rounded_to_cents() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/products")
        .set_json(json!({
            "name": "Chew toy",
            "description": "Rubber bone",
            "image": "bone.png",
            "price": 9.99,
            "discountPercentage": 33
        }))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["product"]["price"], "9.99");
    assert_eq!(created["product"]["discountedPrice"], "6.69");
}

#[actix_web::test]
async fn product_requires_name() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/products")
        .set_json(json!({ "description": "x", "image": "x.png", "price": "1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Product name is required");
}

// ── Users ────────────────────────────────────────────────────────────────────

fn user_payload(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "password": "secret1",
        "email": email,
        "nationalId": "12345678901",
        "address": "Izmir"
    })
}

#[actix_web::test]
async fn user_registration_and_conflicts() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(user_payload("zeynep", "zeynep@example.com"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["user"]["username"], "zeynep");
    assert_eq!(created["user"]["isAdmin"], false);
    assert!(created["user"].get("passwordHash").is_none());
    assert!(created["user"].get("password").is_none());

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(user_payload("zeynep", "other@example.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "This username is already in use" }));

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(user_payload("ali", "zeynep@example.com"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::CONFLICT
    );

    let mut short = user_payload("ali", "ali@example.com");
    short["password"] = json!("123");
    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(&short)
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = test::TestRequest::get().uri("/users").to_request();
    let users: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(users.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn login_checks_credentials() {
    let app = app!(services());

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(user_payload("zeynep", "zeynep@example.com"))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "username": "zeynep", "password": "secret1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["id"], created["user"]["id"]);
    assert_eq!(body["user"]["email"], "zeynep@example.com");
    assert!(body["user"].get("passwordHash").is_none());

    for credentials in [
        json!({ "username": "zeynep", "password": "wrong-one" }),
        json!({ "username": "nobody", "password": "secret1" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/users/login")
            .set_json(&credentials)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "message": "Invalid username or password" }));
    }

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "username": "zeynep" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({ "message": "Username and password are required" }));
}

// ── Comments ─────────────────────────────────────────────────────────────────

#[actix_web::test]
async fn comments_by_product_and_delete() {
    let app = app!(services());

    let mut ids = Vec::new();
    for (product, text) in [("p-1", "great"), ("p-2", "ok"), ("p-1", "bought again")] {
        let req = test::TestRequest::post()
            .uri("/comments")
            .set_json(json!({
                "productId": product,
                "userId": "user-1",
                "username": "ayse",
                "text": text
            }))
            .to_request();
        let comment: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(comment["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::get()
        .uri("/comments/product/p-1")
        .to_request();
    let comments: Value = test::call_and_read_body_json(&app, req).await;
    let texts: Vec<_> = comments
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["text"].clone())
        .collect();
    assert_eq!(texts, vec![json!("bought again"), json!("great")]);

    let req = test::TestRequest::delete()
        .uri(&format!("/comments/{}", ids[0]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    let req = test::TestRequest::delete()
        .uri(&format!("/comments/{}", ids[0]))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::post()
        .uri("/comments")
        .set_json(json!({ "productId": "p-1", "userId": "user-1", "text": "" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

// ── API docs ─────────────────────────────────────────────────────────────────

#[::core::prelude::v1::test]
fn openapi_lists_every_route() {
    let doc = ApiDoc::openapi();
    for path in [
        "/orders",
        "/orders/{orderId}",
        "/orders/{orderId}/status",
        "/orders/user/{userId}",
        "/orders/number/{orderNumber}",
        "/products/{id}",
        "/users",
        "/users/login",
        "/comments/product/{productId}",
    ] {
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }
}
