use assert_cmd::prelude::*;
use predicates::prelude::*;

mod common;
use common::{assertions, sandbox::Sandbox, server::*};

#[cfg(test)]
mod browse_command_tests {
    use super::*;

    #[test]
    fn test_browse_lists_first_page() -> anyhow::Result<()> {
        let server = CatalogServer::start()?;
        let sandbox = Sandbox::new(server.url())?;

        sandbox
            .cmd(&["browse"])?
            .assert()
            .success()
            .stdout(assertions::has_query("(defaults)"))
            .stdout(assertions::has_row(1, "Rick Sanchez"))
            .stdout(assertions::has_row(4, "Abadango Cluster Princess"))
            .stdout(predicate::str::contains("Next page: catalog-explorer next"))
            .stdout(predicate::str::contains("Previous page").not());

        Ok(())
    }

    #[test]
    fn test_search_commits_text_and_resets_page() -> anyhow::Result<()> {
        let server = CatalogServer::start()?;
        let sandbox = Sandbox::new(server.url())?;

        sandbox.cmd(&["browse", "--page", "2"])?.assert().success();

        sandbox
            .cmd(&["search", "rick"])?
            .assert()
            .success()
            .stdout(assertions::has_query("q=rick"))
            .stdout(assertions::has_row(1, "Rick Sanchez"))
            .stdout(assertions::has_row(2, "Adjudicator Rick"))
            .stdout(assertions::has_row(3, "Alien Rick"))
            .stdout(predicate::str::contains("Morty").not());

        assert!(server
            .requests()
            .iter()
            .any(|r| r == "/api/character/?name=rick&page=1"));
        Ok(())
    }

    #[test]
    fn test_sort_keeps_search_and_orders_locally() -> anyhow::Result<()> {
        let server = CatalogServer::start()?;
        let sandbox = Sandbox::new(server.url())?;

        sandbox.cmd(&["search", "rick"])?.assert().success();

        sandbox
            .cmd(&["sort", "name-asc"])?
            .assert()
            .success()
            .stdout(assertions::has_query("q=rick&sort=name-asc"))
            .stdout(assertions::has_row(1, "Adjudicator Rick"))
            .stdout(assertions::has_row(2, "Alien Rick"))
            .stdout(assertions::has_row(3, "Rick Sanchez"));

        sandbox
            .cmd(&["sort", "name-desc"])?
            .assert()
            .success()
            .stdout(assertions::has_row(1, "Rick Sanchez"))
            .stdout(assertions::has_row(3, "Adjudicator Rick"));

        Ok(())
    }

    #[test]
    fn test_status_filter() -> anyhow::Result<()> {
        let server = CatalogServer::start()?;
        let sandbox = Sandbox::new(server.url())?;

        sandbox.cmd(&["search", "rick"])?.assert().success();

        sandbox
            .cmd(&["status", "dead"])?
            .assert()
            .success()
            .stdout(assertions::has_query("q=rick&status=dead"))
            .stdout(assertions::has_row(1, "Adjudicator Rick"))
            .stdout(predicate::str::contains("Rick Sanchez").not());

        // Clearing the filter brings everything back
        sandbox
            .cmd(&["status"])?
            .assert()
            .success()
            .stdout(assertions::has_row(3, "Alien Rick"));

        Ok(())
    }

    #[test]
    fn test_invalid_status_is_rejected() -> anyhow::Result<()> {
        let server = CatalogServer::start()?;
        let sandbox = Sandbox::new(server.url())?;

        sandbox
            .cmd(&["status", "zombie"])?
            .assert()
            .failure()
            .stdout(assertions::has_error("Invalid status: 'zombie'"));

        Ok(())
    }

    #[test]
    fn test_search_without_matches() -> anyhow::Result<()> {
        let server = CatalogServer::start()?;
        let sandbox = Sandbox::new(server.url())?;

        sandbox
            .cmd(&["search", "zzz"])?
            .assert()
            .success()
            .stdout(assertions::no_results())
            .stdout(assertions::error_loading_data().not());

        Ok(())
    }

    #[test]
    fn test_browse_from_query_string() -> anyhow::Result<()> {
        let server = CatalogServer::start()?;
        let sandbox = Sandbox::new(server.url())?;

        sandbox
            .cmd(&["browse", "--state", "q=smith&sort=name-desc"])?
            .assert()
            .success()
            .stdout(assertions::has_query("q=smith&sort=name-desc"))
            .stdout(assertions::has_row(1, "Summer Smith"))
            .stdout(assertions::has_row(2, "Morty Smith"));

        // Plain browse re-renders the saved state
        sandbox
            .cmd(&["browse"])?
            .assert()
            .success()
            .stdout(assertions::has_query("q=smith&sort=name-desc"));

        Ok(())
    }

    #[test]
    fn test_next_and_prev_pages() -> anyhow::Result<()> {
        let server = CatalogServer::start()?;
        let sandbox = Sandbox::new(server.url())?;

        sandbox
            .cmd(&["prev"])?
            .assert()
            .success()
            .stdout(predicate::str::contains("Already on the first page."));

        sandbox
            .cmd(&["next"])?
            .assert()
            .success()
            .stdout(assertions::has_query("page=2"))
            .stdout(assertions::has_row(1, "Adjudicator Rick"))
            .stdout(assertions::has_row(2, "Alien Rick"))
            .stdout(predicate::str::contains("Previous page: catalog-explorer prev"));

        sandbox
            .cmd(&["next"])?
            .assert()
            .success()
            .stdout(predicate::str::contains("Already on the last page."));

        sandbox
            .cmd(&["prev"])?
            .assert()
            .success()
            .stdout(assertions::has_query("(defaults)"))
            .stdout(assertions::has_row(1, "Rick Sanchez"));

        Ok(())
    }

    #[test]
    fn test_unreachable_catalog_shows_retry_hint() -> anyhow::Result<()> {
        let sandbox = Sandbox::new(unreachable_url()?)?;

        sandbox
            .cmd(&["browse"])?
            .assert()
            .success()
            .stdout(assertions::error_loading_data())
            .stdout(predicate::str::contains("catalog-explorer browse' to try again"))
            .stdout(assertions::no_results().not());

        Ok(())
    }

    #[test]
    fn test_invalid_api_url() -> anyhow::Result<()> {
        let sandbox = Sandbox::new("not a url")?;

        sandbox
            .cmd(&["browse"])?
            .assert()
            .failure()
            .stdout(assertions::has_error("Invalid catalog URL"));

        Ok(())
    }
}
