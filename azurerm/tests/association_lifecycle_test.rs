//! Lifecycle tests for the subnet/route-table association, the virtual
//! resource whose existence lives on the parent subnet.

use std::sync::Arc;

use acctest::checks::{DestroyCheck, ExistsCheck};
use acctest::{
    AcctestError, InstanceState, LifecycleResource, Locations, MockApplyEngine, StateSnapshot,
    TestCase, TestContext, TestStep,
};
use azurerm::resources::SubnetRouteTableAssociationTest;
use azurerm::Client;
use mockito::{Server, ServerGuard};

const ADDRESS: &str = "azurerm_subnet_route_table_association.test";

const SUBNET_ID: &str = "/subscriptions/0000/resourceGroups/acctestRG-12345678/providers/Microsoft.Network/virtualNetworks/acctestvnet12345678/subnets/acctestsubnet12345678";

fn test_data() -> TestContext {
    TestContext::with_seed(
        "azurerm_subnet_route_table_association",
        "test",
        12345678,
        "a1b2c",
        Locations {
            primary: "westeurope".to_string(),
            secondary: "northeurope".to_string(),
            ternary: "francecentral".to_string(),
        },
    )
}

fn snapshot() -> StateSnapshot {
    StateSnapshot::new().with_resource(ADDRESS, InstanceState::new(SUBNET_ID))
}

async fn mock_subnet(server: &mut ServerGuard, body: &str) -> mockito::Mock {
    server
        .mock("GET", SUBNET_ID)
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

const ATTACHED: &str = r#"{
    "id": "subnet-id",
    "name": "acctestsubnet12345678",
    "properties": {"addressPrefix": "10.0.2.0/24", "routeTable": {"id": "rt-id"}}
}"#;

const DETACHED: &str = r#"{
    "id": "subnet-id",
    "name": "acctestsubnet12345678",
    "properties": {"addressPrefix": "10.0.2.0/24"}
}"#;

#[tokio::test]
async fn association_exists_after_create() {
    let mut server = Server::new_async().await;
    let _m = mock_subnet(&mut server, ATTACHED).await;

    let client = Client::new(&server.url(), "test-token").unwrap();
    let resource = Arc::new(SubnetRouteTableAssociationTest::new(client));
    let data = test_data();

    let engine = MockApplyEngine::new().on_apply(Ok(snapshot()));

    TestCase::new()
        .step(
            TestStep::apply(resource.render(&data))
                .check(ExistsCheck::new(resource.clone(), ADDRESS)),
        )
        .run(&engine)
        .await
        .unwrap();
}

#[tokio::test]
async fn detached_subnet_fails_the_exists_check() {
    let mut server = Server::new_async().await;
    let _m = mock_subnet(&mut server, DETACHED).await;

    let client = Client::new(&server.url(), "test-token").unwrap();
    let resource = Arc::new(SubnetRouteTableAssociationTest::new(client));
    let data = test_data();

    let engine = MockApplyEngine::new().on_apply(Ok(snapshot()));

    let result = TestCase::new()
        .step(
            TestStep::apply(resource.render(&data))
                .check(ExistsCheck::new(resource.clone(), ADDRESS)),
        )
        .run(&engine)
        .await;

    assert!(matches!(
        result,
        Err(AcctestError::StepFailed { index: 0, .. })
    ));
}

#[tokio::test]
async fn destroy_sweep_accepts_a_detached_parent() {
    let mut server = Server::new_async().await;
    let _m = mock_subnet(&mut server, DETACHED).await;

    let client = Client::new(&server.url(), "test-token").unwrap();
    let resource = Arc::new(SubnetRouteTableAssociationTest::new(client));
    let data = test_data();

    let engine = MockApplyEngine::new().on_apply(Ok(snapshot()));

    TestCase::new()
        .step(TestStep::apply(resource.render(&data)))
        .check_destroy(DestroyCheck::new(resource.clone()))
        .run(&engine)
        .await
        .unwrap();
}

#[tokio::test]
async fn removing_the_association_block_detaches() {
    let mut server = Server::new_async().await;
    let _m = mock_subnet(&mut server, ATTACHED).await;

    let client = Client::new(&server.url(), "test-token").unwrap();
    let resource = Arc::new(SubnetRouteTableAssociationTest::new(client));
    let data = test_data();

    // second apply drops the association from both config and state
    let engine = MockApplyEngine::new()
        .on_apply(Ok(snapshot()))
        .on_apply(Ok(StateSnapshot::new()));

    TestCase::new()
        .step(
            TestStep::apply(resource.config_basic(&data))
                .check(ExistsCheck::new(resource.clone(), ADDRESS)),
        )
        .step(TestStep::apply(resource.config_without_association(&data)))
        .run(&engine)
        .await
        .unwrap();

    let applied = engine.applied();
    assert!(applied[0].contains("azurerm_subnet_route_table_association"));
    assert!(!applied[1].contains("azurerm_subnet_route_table_association"));
}
