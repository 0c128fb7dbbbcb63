//! List command: one generic implementation for every resource.

use anyhow::{Context as _, Result, bail};
use inquire::Select;
use livebet_business::{
    ApiData, PaginationMode, Resource, ResolvedMode, ResourceQuery, TableAction, TableModel,
    TableOptions, TableState,
};
use tracing::instrument;

use crate::cli::ListArgs;
use crate::context::AppContext;
use crate::output::Output;
use crate::render::{render_pagination, render_table};

/// Fetches the page described by `args` and the table model to show it with.
pub async fn load_page<R: Resource>(
    ctx: &AppContext,
    args: &ListArgs,
) -> Result<(ApiData<R::Row>, TableModel)> {
    ctx.ensure_authenticated()?;

    let mut query = ResourceQuery::<R>::new(ctx.client.clone());
    if let Some((field, order)) = &args.sort {
        query.set_sort(field.clone(), *order);
    }
    for (key, value) in &args.filter {
        query.patch_filter(key.clone(), value.clone());
    }

    let mut model = if args.client_side {
        query.change_page_size(args.fetch_limit);
        let mut model = TableModel::new(TableOptions {
            mode: PaginationMode::Client,
            page_size: args.limit,
            ..TableOptions::default()
        });
        model.apply(TableAction::GoToPage(args.page), ResolvedMode::Client);
        model
    } else {
        query.change_page_size(args.limit);
        query.change_page(args.page);
        TableModel::with_mode(PaginationMode::Server)
    };
    if let Some((field, order)) = query.params().sort() {
        model.set_sort(field, order);
    }

    let data = query.refresh().await;
    if let Some(error) = &data.error {
        bail!("Failed to load {}: {error}", R::NAME);
    }
    Ok((data, model))
}

/// Prints the table; with `--interactive` returns the row the user picked.
#[instrument(skip_all, name = "list", fields(resource = R::NAME, page = args.page, limit = args.limit))]
pub async fn run_list<R: Resource>(ctx: &AppContext, args: &ListArgs) -> Result<Option<R::Row>> {
    let out = Output::new();
    let (data, model) = load_page::<R>(ctx, args).await?;
    let columns = R::columns(ctx.locale);
    let view = model.view(&data, &columns);

    out.header(ctx.locale.t(R::TITLE));
    out.print(render_table(&view, ctx.locale));
    if let Some(pagination) = &view.pagination {
        out.dim(render_pagination(pagination, ctx.locale));
    }

    let TableState::Rows(rows) = &view.state else {
        return Ok(None);
    };
    if !args.interactive {
        return Ok(None);
    }

    let options: Vec<String> = rows
        .iter()
        .map(|row| {
            let cells: Vec<String> = columns
                .iter()
                .take(3)
                .map(|column| column.render(row.row).plain())
                .collect();
            format!("#{} {}", row.number, cells.join(" | "))
        })
        .collect();
    let selection = Select::new("Select a row:", options.clone())
        .with_help_message("Use arrow keys to navigate, Enter to select")
        .prompt_skippable()
        .context("Failed to select row")?;

    let Some(index) = selection.and_then(|picked| options.iter().position(|o| *o == picked))
    else {
        return Ok(None);
    };
    let row = rows[index].row;

    out.newline();
    out.header(ctx.locale.t(livebet_business::Text::Details));
    for column in &columns {
        out.labeled(&column.label, column.render(row).plain());
    }
    Ok(Some(row.clone()))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::ResourceKind;
    use crate::config::Config;
    use livebet_business::resources::Transactions;
    use livebet_business::{BusinessConfig, Locale, Session, SessionUser};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn args(page: u32, limit: u32) -> ListArgs {
        ListArgs {
            resource: ResourceKind::Transactions,
            page,
            limit,
            sort: None,
            filter: vec![("status".to_owned(), json!("success"))],
            client_side: false,
            fetch_limit: 100,
            interactive: false,
        }
    }

    fn signed_in(server: &MockServer) -> AppContext {
        let mut config = Config::default();
        config.set_session(&Session {
            access_token: "tok".to_owned(),
            user: SessionUser::new("u1", "admin"),
            expires_at: chrono::Utc::now() + chrono::Duration::hours(1),
        });
        AppContext::new(
            BusinessConfig::new(server.uri()),
            config,
            PathBuf::from("unused.toml"),
            Some(Locale::En),
        )
    }

    fn transactions(count: usize) -> serde_json::Value {
        let data: Vec<_> = (0..count)
            .map(|i| {
                json!({
                    "_id": format!("t{i}"),
                    "amount": 1000 * (i + 1),
                    "status": "success",
                    "type": "deposit",
                    "message": "",
                    "time": "2024-01-01T00:00:00.000Z"
                })
            })
            .collect();
        json!({ "success": true, "result": { "data": data } })
    }

    #[tokio::test]
    async fn test_list_sends_page_filters_and_default_sort() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/admin/transaction/list"))
            .and(body_json(json!({
                "page": 2,
                "limit": 5,
                "filterBy": { "status": "success" },
                "sortBy": { "amount": -1 }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(transactions(5)))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = signed_in(&server);
        let (data, model) = load_page::<Transactions>(&ctx, &args(2, 5)).await.unwrap();

        assert_eq!(data.rows().len(), 5);
        assert_eq!(model.sort().map(|s| s.key.as_str()), Some("amount"));
    }

    #[tokio::test]
    async fn test_client_side_fetches_once_and_pages_locally() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/admin/transaction/list"))
            .and(wiremock::matchers::body_partial_json(json!({ "page": 1, "limit": 100 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(transactions(23)))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = signed_in(&server);
        let mut list_args = args(3, 10);
        list_args.client_side = true;
        let (data, model) = load_page::<Transactions>(&ctx, &list_args).await.unwrap();
        let columns = Transactions::columns(Locale::En);
        let view = model.view(&data, &columns);

        let pagination = view.pagination.unwrap();
        assert_eq!((pagination.from, pagination.to, pagination.total_items), (21, 23, 23));
    }

    #[tokio::test]
    async fn test_backend_error_fails_the_command() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "expired" })))
            .expect(1)
            .mount(&server)
            .await;

        let ctx = signed_in(&server);
        let err = load_page::<Transactions>(&ctx, &args(1, 10))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to load transactions: expired");
    }

    #[tokio::test]
    async fn test_requires_saved_session() {
        let server = MockServer::start().await;
        let ctx = AppContext::new(
            BusinessConfig::new(server.uri()),
            Config::default(),
            PathBuf::from("unused.toml"),
            None,
        );

        let err = load_page::<Transactions>(&ctx, &args(1, 10))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Not signed in"));
        assert_eq!(ctx.locale, Locale::En);
    }
}
