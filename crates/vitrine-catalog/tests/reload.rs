//! Reload tests: swap-on-success, keep-on-failure and the single-reload gate.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use vitrine_catalog::prelude::*;
use vitrine_catalog::source::{CategoryEntry, ProductDetail, ProductEntry};
use vitrine_core::{CategoryId, PathSegment, ProductId};
use vitrine_test_utils::{
    CatalogFixture, ProductSpec, assert_category_names, assert_snapshot_consistent,
};

fn service_for(root: &std::path::Path) -> Result<CatalogService> {
    let source: Arc<dyn CatalogSource> = Arc::new(FsCatalogSource::new(root));
    CatalogService::bootstrap(source).context("bootstrap")
}

#[tokio::test]
async fn reload_picks_up_new_products() -> Result<()> {
    let catalog = CatalogFixture::fruits_and_veggies().write();
    let service = service_for(catalog.root())?;
    assert_eq!(service.snapshot().product_count(), 3);

    catalog.rewrite(
        &CatalogFixture::fruits_and_veggies()
            .category("herbs", &[ProductSpec::new("basil"), ProductSpec::new("mint")]),
    );
    let summary = service.reload().await?;

    assert_eq!(summary.generation, 2);
    assert_eq!(summary.categories, 3);
    assert_eq!(summary.products, 5);

    let snapshot = service.snapshot();
    assert_snapshot_consistent(&snapshot);
    assert_category_names(&snapshot, &["fruits", "veggies", "herbs"]);
    assert_eq!(
        get_product(&snapshot, ProductId::new(4))?.category_id,
        CategoryId::new(2)
    );
    Ok(())
}

#[tokio::test]
async fn held_snapshot_is_unaffected_by_reload() -> Result<()> {
    let catalog = CatalogFixture::fruits_and_veggies().write();
    let service = service_for(catalog.root())?;
    let held = service.snapshot();

    catalog.rewrite(&CatalogFixture::new().category("other", &[]));
    service.reload().await?;

    assert_category_names(&held, &["fruits", "veggies"]);
    assert_eq!(held.product_count(), 3);
    assert_category_names(&service.snapshot(), &["other"]);
    Ok(())
}

#[tokio::test]
async fn failed_reload_keeps_previous_snapshot() -> Result<()> {
    let catalog = CatalogFixture::fruits_and_veggies().write();
    let service = service_for(catalog.root())?;
    let before = service.snapshot();

    catalog.overwrite("categories/fruits/products/apple/details.yml", "name: Apple\n");
    let err = service.reload().await.unwrap_err();

    assert!(matches!(err, CatalogError::Source(_)));
    assert_eq!(service.store().generation(), 1);
    assert!(Arc::ptr_eq(&before, &service.snapshot()));
    Ok(())
}

/// A source whose next manifest read blocks once armed, until released.
#[derive(Debug)]
struct GatedSource {
    entered: Mutex<Option<mpsc::Sender<()>>>,
    release: Mutex<mpsc::Receiver<()>>,
    builds: AtomicUsize,
}

impl GatedSource {
    fn new(release: mpsc::Receiver<()>) -> Self {
        Self {
            entered: Mutex::new(None),
            release: Mutex::new(release),
            builds: AtomicUsize::new(0),
        }
    }

    fn builds(&self) -> usize {
        self.builds.load(Ordering::SeqCst)
    }

    fn arm(&self, entered: mpsc::Sender<()>) {
        *self.entered.lock().unwrap() = Some(entered);
    }
}

impl CatalogSource for GatedSource {
    fn read_categories(&self) -> std::result::Result<Vec<CategoryEntry>, SourceReadError> {
        self.builds.fetch_add(1, Ordering::SeqCst);
        let entered = self.entered.lock().unwrap().take();
        if let Some(entered) = entered {
            entered.send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
        Ok(vec![CategoryEntry {
            name: PathSegment::new("slow").unwrap(),
        }])
    }

    fn read_product_names(
        &self,
        _category: &PathSegment,
    ) -> std::result::Result<Vec<ProductEntry>, SourceReadError> {
        Ok(Vec::new())
    }

    fn read_product_detail(
        &self,
        _category: &PathSegment,
        _product: &PathSegment,
    ) -> std::result::Result<ProductDetail, SourceReadError> {
        unreachable!("no products are listed")
    }

    fn describe(&self) -> String {
        "gated:".to_string()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_reload_is_rejected() -> Result<()> {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();

    let source = Arc::new(GatedSource::new(release_rx));
    let service = Arc::new(CatalogService::bootstrap(
        Arc::clone(&source) as Arc<dyn CatalogSource>
    )?);
    source.arm(entered_tx);

    let first = tokio::spawn({
        let service = Arc::clone(&service);
        async move { service.reload().await }
    });
    tokio::task::spawn_blocking(move || entered_rx.recv_timeout(Duration::from_secs(5)))
        .await?
        .context("first reload never started")?;

    let second = service.reload().await;
    assert!(matches!(second, Err(CatalogError::ReloadInProgress)));
    assert_eq!(service.store().generation(), 1);

    release_tx.send(())?;
    let summary = first.await??;
    assert_eq!(summary.generation, 2);

    // The gate is free again once the first reload finishes.
    assert_eq!(service.reload().await?.generation, 3);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn abandoned_reload_keeps_gate_and_publishes() -> Result<()> {
    let (entered_tx, entered_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel();

    let source = Arc::new(GatedSource::new(release_rx));
    let service = CatalogService::bootstrap(Arc::clone(&source) as Arc<dyn CatalogSource>)?;
    source.arm(entered_tx);

    let abandoned = tokio::time::timeout(Duration::from_millis(200), service.reload()).await;
    assert!(abandoned.is_err(), "reload should still be blocked in its build");
    entered_rx
        .recv_timeout(Duration::from_secs(5))
        .context("first build never started")?;

    let second = service.reload().await;
    assert!(matches!(second, Err(CatalogError::ReloadInProgress)));
    assert_eq!(source.builds(), 2);

    release_tx.send(())?;
    let mut waited = Duration::ZERO;
    let next = loop {
        match service.reload().await {
            Err(CatalogError::ReloadInProgress) => {
                assert!(waited < Duration::from_secs(5), "gate was never released");
                tokio::time::sleep(Duration::from_millis(10)).await;
                waited += Duration::from_millis(10);
            }
            other => break other?,
        }
    };

    // The abandoned build published generation 2 before releasing the gate.
    assert_eq!(next.generation, 3);
    assert_eq!(source.builds(), 3);
    Ok(())
}
