//! Controller + HTTP client against a live router on an ephemeral port

use spendwise::api::{build_router, ApiConfig, AppState};
use spendwise::client::{ClientConfig, ExpenseApi, HttpExpenseClient};
use spendwise::controller::{TerminalView, ViewController, ADD_FAILURE_MESSAGE, ADD_SUCCESS_MESSAGE};
use spendwise::model::{EntryForm, Filter};
use spendwise::store::{ExpenseStore, NewExpense};
use spendwise::EntryType;

type TestController = ViewController<HttpExpenseClient, TerminalView<Vec<u8>>>;

async fn spawn_server(store: ExpenseStore) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = build_router(AppState::new(store, ApiConfig::default()));

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

fn seed(store: &ExpenseStore, count: u32) {
    for day in 1..=count {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        let expense = NewExpense::new(
            10.0,
            format!("Coffee {}", day),
            "food".to_string(),
            EntryType::Expense,
            date,
        );
        store.add(&expense).unwrap();
    }
}

fn controller(base_url: &str) -> TestController {
    let client = HttpExpenseClient::new(ClientConfig::new(base_url)).unwrap();
    ViewController::new(client, TerminalView::new(Vec::new()))
}

fn output(controller: TestController) -> String {
    let (_, view) = controller.into_parts();
    String::from_utf8(view.into_inner()).unwrap()
}

#[tokio::test]
async fn test_initialize_and_load_more() {
    let store = ExpenseStore::open_in_memory().unwrap();
    seed(&store, 15);
    let base_url = spawn_server(store).await;

    let mut ctl = controller(&base_url);
    ctl.initialize().await;

    assert_eq!(ctl.entries().len(), 10);
    assert_eq!(ctl.entries().items()[0].date, "2024-01-15");
    assert_eq!(ctl.summary().unwrap().total_expense, 150.0);

    assert!(ctl.load_more().await);
    assert_eq!(ctl.entries().len(), 15);
    assert!(ctl.entries().is_exhausted());
    assert_eq!(ctl.entries().items()[14].date, "2024-01-01");

    // Nothing left to request
    assert!(!ctl.load_more().await);

    let text = output(ctl);
    assert!(text.contains("Total expense"));
    assert!(text.contains("₹150.00"));
    assert!(text.contains("2024-01-15: Coffee 15"));
    assert!(text.contains("-₹10"));
    assert!(text.contains("(15 shown)"));
}

#[tokio::test]
async fn test_submit_entry_round_trip() {
    let store = ExpenseStore::open_in_memory().unwrap();
    let base_url = spawn_server(store.clone()).await;

    let mut ctl = controller(&base_url);
    ctl.initialize().await;
    assert!(ctl.entries().is_empty());

    let form = EntryForm::new()
        .field("date", "2024-02-01")
        .field("description", "Salary")
        .field("amount", "2500")
        .field("type", "income")
        .field("category", "work");
    assert!(ctl.submit_entry(&form).await);

    assert_eq!(store.count().unwrap(), 1);
    assert_eq!(ctl.entries().len(), 1);
    assert_eq!(ctl.summary().unwrap().net_balance, 2500.0);

    // Missing description is rejected by the server
    let bad = EntryForm::new()
        .field("date", "2024-02-01")
        .field("amount", "1")
        .field("type", "expense")
        .field("category", "misc");
    assert!(!ctl.submit_entry(&bad).await);
    assert_eq!(store.count().unwrap(), 1);

    let text = output(ctl);
    assert!(text.contains(&format!("! {}", ADD_SUCCESS_MESSAGE)));
    assert!(text.contains(&format!("! {}", ADD_FAILURE_MESSAGE)));
    assert!(text.contains("+₹2500"));
}

#[tokio::test]
async fn test_filter_is_a_single_fresh_load() {
    let store = ExpenseStore::open_in_memory().unwrap();
    seed(&store, 25);
    store
        .add(&NewExpense::new(
            99.0,
            "Rent".to_string(),
            "housing".to_string(),
            EntryType::Expense,
            chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        ))
        .unwrap();
    let base_url = spawn_server(store).await;

    let mut ctl = controller(&base_url);
    ctl.initialize().await;

    let filter = Filter::from_inputs("2024-01-01", "2024-01-12", "food").unwrap();
    assert!(ctl.apply_filter(filter.clone()).await);
    assert_eq!(ctl.entries().len(), 10);
    assert_eq!(ctl.entries().active_filter(), Some(&filter));

    assert!(ctl.entries().items().iter().all(|e| e.category.as_deref() == Some("food")));

    // No pagination while the filtered rows are shown
    assert!(!ctl.load_more().await);
    assert_eq!(ctl.entries().len(), 10);

    assert!(ctl.clear_filter().await);
    assert_eq!(ctl.entries().len(), 10);
    assert_eq!(ctl.entries().items()[0].description, "Rent");
}

#[tokio::test]
async fn test_export_and_delete() {
    let store = ExpenseStore::open_in_memory().unwrap();
    seed(&store, 2);
    let base_url = spawn_server(store.clone()).await;

    let mut ctl = controller(&base_url);
    ctl.export_csv();
    let url = ctl.view_mut().take_download().unwrap();
    assert_eq!(url, format!("{}/export", base_url));

    let csv = ctl.api().fetch_export().await.unwrap();
    let mut lines = csv.lines();
    assert_eq!(lines.next(), Some("ID,Amount,Description,Category,Type,Date"));
    assert_eq!(lines.next(), Some("1,10.0,Coffee 1,food,expense,2024-01-01"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("expenses.csv");
    let written = ctl.api().download_export(&path).await.unwrap();
    assert_eq!(written, csv.len());

    assert!(ctl.delete_entry(1).await);
    assert_eq!(store.count().unwrap(), 1);
    assert!(!ctl.delete_entry(1).await);
}

#[tokio::test]
async fn test_unreachable_server_keeps_previous_state() {
    let mut ctl = controller("http://127.0.0.1:9");

    assert!(!ctl.refresh_summary().await);
    assert!(!ctl.load_entries(1).await);
    assert!(ctl.summary().is_none());
    assert!(ctl.entries().is_empty());

    let err = ctl.api().summary().await.unwrap_err();
    assert!(!err.is_rejection());
}
