use vasari_interface::PlatformGateway;
use vasari_social::DryRunGateway;

#[tokio::test]
async fn reads_are_empty() {
    let gateway = DryRunGateway::new("page_1");
    assert!(gateway.list_recent_posts("page_1", 3).await.unwrap().is_empty());
    assert!(gateway.list_comments("post", 9).await.unwrap().is_empty());
    assert!(gateway.list_recent_threads(40).await.unwrap().is_empty());
}

#[tokio::test]
async fn writes_return_numbered_receipts() {
    let gateway = DryRunGateway::new("page_1");
    let first = gateway.publish_post("page_1", "hello").await.unwrap();
    let second = gateway.reply_to_comment("c1", "thanks").await.unwrap();
    assert_eq!(first.id(), Some("dry_run_1"));
    assert_eq!(second.id(), Some("dry_run_2"));
    assert_eq!(first.value()["dry_run"], true);
    assert_eq!(gateway.writes(), 2);
}

#[tokio::test]
async fn latest_message_is_self_authored() {
    let gateway = DryRunGateway::new("page_1");
    let latest = gateway.get_latest_message("t1").await.unwrap();
    assert_eq!(latest.sender_id, gateway.account_id());
    assert_eq!(gateway.transport_name(), "dry_run");
}
