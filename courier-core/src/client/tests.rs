#[cfg(test)]
mod tests {
    use crate::client::{ClientError, MessengerClient, TelegramClient};
    use mockito::Matcher;
    use serde_json::json;

    const TOKEN: &str = "123:test-token";

    fn client_for(server: &mockito::ServerGuard) -> TelegramClient {
        TelegramClient::with_base_url(server.url(), TOKEN)
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/bot123:test-token/sendMessage")
            .match_body(Matcher::Json(json!({
                "chat_id": "-100500",
                "text": "Deploy finished"
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":true,"result":{"message_id":7,"date":1700000000,"chat":{"id":-100500}}}"#)
            .create_async()
            .await;

        let sent = client_for(&server)
            .send_message("-100500", "Deploy finished")
            .await
            .unwrap();

        assert_eq!(sent.message_id, 7);
        assert_eq!(sent.date, 1700000000);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_message_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/bot123:test-token/sendMessage")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#)
            .create_async()
            .await;

        let err = client_for(&server)
            .send_message("1", "hello")
            .await
            .unwrap_err();

        assert!(err.is_api_error());
        match err {
            ClientError::Api {
                description,
                error_code,
            } => {
                assert_eq!(description, "Bad Request: chat not found");
                assert_eq!(error_code, Some(400));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/bot123:test-token/sendMessage")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .send_message("1", "hello")
            .await
            .unwrap_err();

        assert!(!err.is_api_error());
        assert!(matches!(err, ClientError::InvalidResponse { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_get_me() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/bot123:test-token/getMe")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"ok":true,"result":{"id":123,"is_bot":true,"first_name":"Courier","username":"courier_bot"}}"#,
            )
            .create_async()
            .await;

        let me = client_for(&server).get_me().await.unwrap();

        assert_eq!(me.id, 123);
        assert!(me.is_bot);
        assert_eq!(me.first_name, "Courier");
        assert_eq!(me.username.as_deref(), Some("courier_bot"));
    }

    #[tokio::test]
    async fn test_get_me_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/bot123:test-token/getMe")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"ok":false,"error_code":401,"description":"Unauthorized"}"#)
            .create_async()
            .await;

        let err = client_for(&server).get_me().await.unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized");
    }

    #[tokio::test]
    async fn test_connection_refused_is_request_error() {
        // 端口 9 (discard) 上没有服务监听
        let client = TelegramClient::with_base_url("http://127.0.0.1:9".to_string(), TOKEN);

        let err = client.send_message("1", "hello").await.unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        let client = TelegramClient::with_base_url("http://127.0.0.1:9".to_string(), TOKEN);

        let send_err = client.send_message("1", "hello").await.unwrap_err();
        let me_err = client.get_me().await.unwrap_err();

        for err in [send_err, me_err] {
            assert!(!err.to_string().contains("test-token"), "{err}");
            assert!(!format!("{err:?}").contains("test-token"), "{err:?}");
        }
    }

    #[test]
    fn test_debug_hides_token() {
        let client = TelegramClient::new(TOKEN);
        let debug = format!("{client:?}");
        assert!(!debug.contains("test-token"));
        assert_eq!(client.base_url(), "https://api.telegram.org");
    }
}
