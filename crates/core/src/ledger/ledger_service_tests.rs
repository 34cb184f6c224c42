#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use crate::errors::{DatabaseError, Error, LedgerError, Result, ValidationError};
    use crate::items::{Item, ItemRepositoryTrait};
    use crate::ledger::{
        LedgerCache, StockLedgerRequest, StockLedgerService, StockLedgerServiceTrait,
    };
    use crate::movements::{Movement, MovementSourceTrait, MovementType, MovementWindow};

    const ITEM_ID: i64 = 7;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    struct MockItemRepository {
        items: HashMap<i64, Item>,
    }

    impl MockItemRepository {
        fn with_items(ids: &[i64]) -> Self {
            let items = ids
                .iter()
                .map(|id| {
                    (
                        *id,
                        Item {
                            id: *id,
                            code: format!("ITM-{}", id),
                            name: format!("Item {}", id),
                            category: None,
                            unit: "pcs".to_string(),
                        },
                    )
                })
                .collect();
            Self { items }
        }
    }

    #[async_trait]
    impl ItemRepositoryTrait for MockItemRepository {
        async fn get_item(&self, item_id: i64) -> Result<Item> {
            self.items
                .get(&item_id)
                .cloned()
                .ok_or(Error::ItemNotFound(item_id))
        }

        async fn list_items(&self) -> Result<Vec<Item>> {
            Ok(self.items.values().cloned().collect())
        }
    }

    struct MockMovementSource {
        movement_type: MovementType,
        movements: Vec<(i64, Movement)>,
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockMovementSource {
        fn new(movement_type: MovementType) -> Self {
            Self {
                movement_type,
                movements: Vec::new(),
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(movement_type: MovementType) -> Self {
            Self {
                fail: true,
                ..Self::new(movement_type)
            }
        }

        fn with(mut self, item_id: i64, movement: Movement) -> Self {
            self.movements.push((item_id, movement));
            self
        }
    }

    #[async_trait]
    impl MovementSourceTrait for MockMovementSource {
        fn movement_type(&self) -> MovementType {
            self.movement_type
        }

        async fn fetch_movements(
            &self,
            item_id: i64,
            window: MovementWindow,
        ) -> Result<Vec<Movement>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Database(DatabaseError::ConnectionFailed(
                    "store offline".to_string(),
                )));
            }
            Ok(self
                .movements
                .iter()
                .filter(|(id, movement)| *id == item_id && window.contains(movement.date))
                .map(|(_, movement)| movement.clone())
                .collect())
        }
    }

    fn movement(
        on: NaiveDate,
        movement_type: MovementType,
        quantity: u32,
        amount: Decimal,
        reference: &str,
    ) -> Movement {
        Movement::new(on, movement_type, quantity, amount, reference)
    }

    struct Fixture {
        purchases: MockMovementSource,
        purchase_returns: MockMovementSource,
        sales: MockMovementSource,
        sale_returns: MockMovementSource,
    }

    impl Fixture {
        fn empty() -> Self {
            Self {
                purchases: MockMovementSource::new(MovementType::Purchase),
                purchase_returns: MockMovementSource::new(MovementType::PurchaseReturn),
                sales: MockMovementSource::new(MovementType::Sale),
                sale_returns: MockMovementSource::new(MovementType::SaleReturn),
            }
        }

        /// 50 units on hand before January, one purchase and one sale inside it.
        fn january() -> Self {
            let mut fixture = Self::empty();
            fixture.purchases = fixture
                .purchases
                .with(
                    ITEM_ID,
                    movement(date(2023, 12, 1), MovementType::Purchase, 60, dec!(5400), "P-001"),
                )
                .with(
                    ITEM_ID,
                    movement(date(2024, 1, 1), MovementType::Purchase, 20, dec!(2000), "P-002"),
                );
            fixture.sales = fixture
                .sales
                .with(
                    ITEM_ID,
                    movement(date(2023, 12, 15), MovementType::Sale, 10, dec!(1200), "S-001"),
                )
                .with(
                    ITEM_ID,
                    movement(date(2024, 1, 2), MovementType::Sale, 10, dec!(1500), "S-002"),
                );
            fixture
        }

        fn into_sources(self) -> Vec<Arc<dyn MovementSourceTrait>> {
            vec![
                Arc::new(self.sale_returns),
                Arc::new(self.sales),
                Arc::new(self.purchase_returns),
                Arc::new(self.purchases),
            ]
        }
    }

    fn service(fixture: Fixture) -> StockLedgerService {
        StockLedgerService::new(
            Arc::new(MockItemRepository::with_items(&[ITEM_ID, 8])),
            fixture.into_sources(),
        )
        .unwrap()
    }

    fn january_request() -> StockLedgerRequest {
        StockLedgerRequest::new(ITEM_ID, date(2024, 1, 1), date(2024, 1, 31))
    }

    #[tokio::test]
    async fn builds_ledger_with_opening_balance_and_summary() {
        let report = service(Fixture::january())
            .get_stock_ledger(&january_request())
            .await
            .unwrap();

        assert_eq!(report.opening_stock, 50);
        let balances: Vec<i64> = report.transactions.iter().map(|t| t.balance).collect();
        assert_eq!(balances, vec![70, 60]);
        assert_eq!(report.closing_stock, 60);

        assert_eq!(report.transactions[0].qty_in, 20);
        assert_eq!(report.transactions[1].qty_out, 10);

        let summary = &report.summary;
        assert_eq!(summary.total_purchase_qty, 20);
        assert_eq!(summary.total_purchase_value, dec!(2000));
        assert_eq!(summary.total_sale_qty, 10);
        assert_eq!(summary.total_sale_value, dec!(1500));
        assert_eq!(summary.avg_cost, dec!(100));
        assert_eq!(summary.profit, dec!(500));
        assert_eq!(summary.margin_percent, dec!(33.33));
    }

    #[tokio::test]
    async fn empty_range_reports_opening_stock_only() {
        let mut fixture = Fixture::empty();
        fixture.purchases = fixture.purchases.with(
            ITEM_ID,
            movement(date(2023, 6, 1), MovementType::Purchase, 15, dec!(150), "P-OLD"),
        );

        let report = service(fixture)
            .get_stock_ledger(&january_request())
            .await
            .unwrap();

        assert_eq!(report.opening_stock, 15);
        assert_eq!(report.closing_stock, 15);
        assert!(report.transactions.is_empty());
        assert!(report.summary.is_zero());
    }

    #[tokio::test]
    async fn other_items_do_not_leak_into_ledger() {
        let mut fixture = Fixture::january();
        fixture.sales = fixture.sales.with(
            8,
            movement(date(2024, 1, 3), MovementType::Sale, 99, dec!(990), "S-OTHER"),
        );

        let report = service(fixture)
            .get_stock_ledger(&january_request())
            .await
            .unwrap();
        assert_eq!(report.transactions.len(), 2);
        assert!(report.transactions.iter().all(|t| t.ref_id != "S-OTHER"));
    }

    #[tokio::test]
    async fn same_day_mixed_types_are_ordered_deterministically() {
        let day = date(2024, 1, 5);
        let mut fixture = Fixture::empty();
        fixture.sale_returns = fixture
            .sale_returns
            .with(ITEM_ID, movement(day, MovementType::SaleReturn, 1, dec!(12), "SR-1"));
        fixture.sales = fixture
            .sales
            .with(ITEM_ID, movement(day, MovementType::Sale, 3, dec!(36), "S-9"));
        fixture.purchases = fixture
            .purchases
            .with(ITEM_ID, movement(day, MovementType::Purchase, 5, dec!(40), "P-9"));

        let service = service(fixture);
        let first = service.get_stock_ledger(&january_request()).await.unwrap();
        let second = service.get_stock_ledger(&january_request()).await.unwrap();

        let order: Vec<&str> = first.transactions.iter().map(|t| t.ref_id.as_str()).collect();
        assert_eq!(order, vec!["P-9", "S-9", "SR-1"]);
        let balances: Vec<i64> = first.transactions.iter().map(|t| t.balance).collect();
        assert_eq!(balances, vec![5, 2, 3]);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn negative_balance_is_reported() {
        let mut fixture = Fixture::empty();
        fixture.sales = fixture.sales.with(
            ITEM_ID,
            movement(date(2024, 1, 10), MovementType::Sale, 4, dec!(40), "S-1"),
        );

        let report = service(fixture)
            .get_stock_ledger(&january_request())
            .await
            .unwrap();
        assert_eq!(report.opening_stock, 0);
        assert_eq!(report.closing_stock, -4);
    }

    #[tokio::test]
    async fn failing_source_fails_whole_report() {
        let mut fixture = Fixture::january();
        fixture.sales = MockMovementSource::failing(MovementType::Sale);

        let result = service(fixture).get_stock_ledger(&january_request()).await;
        match result {
            Err(Error::Ledger(LedgerError::SourceUnavailable { movement_type, .. })) => {
                assert_eq!(movement_type, MovementType::Sale);
            }
            other => panic!("expected source failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn mistagged_movement_fails_closed() {
        let mut fixture = Fixture::empty();
        fixture.sales = fixture.sales.with(
            ITEM_ID,
            movement(date(2024, 1, 4), MovementType::Purchase, 1, dec!(1), "X-1"),
        );

        let error = service(fixture)
            .get_stock_ledger(&january_request())
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Ledger(LedgerError::InvalidMovement { .. })
        ));
        assert!(error.is_source_failure());
    }

    #[tokio::test]
    async fn invalid_requests_never_reach_sources() {
        let purchases = Arc::new(MockMovementSource::new(MovementType::Purchase));
        let service = StockLedgerService::new(
            Arc::new(MockItemRepository::with_items(&[ITEM_ID])),
            vec![
                purchases.clone() as Arc<dyn MovementSourceTrait>,
                Arc::new(MockMovementSource::new(MovementType::PurchaseReturn)),
                Arc::new(MockMovementSource::new(MovementType::Sale)),
                Arc::new(MockMovementSource::new(MovementType::SaleReturn)),
            ],
        )
        .unwrap();

        let inverted = StockLedgerRequest::new(ITEM_ID, date(2024, 2, 1), date(2024, 1, 1));
        assert!(matches!(
            service.get_stock_ledger(&inverted).await,
            Err(Error::Validation(ValidationError::InvalidDateRange { .. }))
        ));

        let unknown = StockLedgerRequest::new(404, date(2024, 1, 1), date(2024, 1, 31));
        assert!(matches!(
            service.get_stock_ledger(&unknown).await,
            Err(Error::ItemNotFound(404))
        ));

        assert_eq!(purchases.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn cache_serves_repeat_requests() {
        let purchases = Arc::new(MockMovementSource::new(MovementType::Purchase).with(
            ITEM_ID,
            movement(date(2024, 1, 3), MovementType::Purchase, 2, dec!(20), "P-1"),
        ));
        let cache = Arc::new(LedgerCache::new(16));
        let service = StockLedgerService::new(
            Arc::new(MockItemRepository::with_items(&[ITEM_ID])),
            vec![
                purchases.clone() as Arc<dyn MovementSourceTrait>,
                Arc::new(MockMovementSource::new(MovementType::PurchaseReturn)),
                Arc::new(MockMovementSource::new(MovementType::Sale)),
                Arc::new(MockMovementSource::new(MovementType::SaleReturn)),
            ],
        )
        .unwrap()
        .with_cache(cache.clone());

        let first = service.get_stock_ledger(&january_request()).await.unwrap();
        // One call for the opening balance, one for the range.
        assert_eq!(purchases.calls.load(Ordering::SeqCst), 2);

        let second = service.get_stock_ledger(&january_request()).await.unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(purchases.calls.load(Ordering::SeqCst), 2);

        service.invalidate_cache(Some(ITEM_ID));
        assert!(cache.is_empty());
        service.get_stock_ledger(&january_request()).await.unwrap();
        assert_eq!(purchases.calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn failed_reports_are_not_cached() {
        let mut fixture = Fixture::january();
        fixture.purchase_returns = MockMovementSource::failing(MovementType::PurchaseReturn);
        let cache = Arc::new(LedgerCache::new(16));
        let service = service(fixture).with_cache(cache.clone());

        assert!(service.get_stock_ledger(&january_request()).await.is_err());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn valuation_overflow_fails_the_report() {
        let huge = Decimal::from_str_exact("50000000000000000000000000000").unwrap();
        let mut fixture = Fixture::empty();
        fixture.sales = fixture
            .sales
            .with(ITEM_ID, movement(date(2024, 1, 8), MovementType::Sale, 1, huge, "S-1"))
            .with(ITEM_ID, movement(date(2024, 1, 9), MovementType::Sale, 1, huge, "S-2"));
        let cache = Arc::new(LedgerCache::new(16));
        let service = service(fixture).with_cache(cache.clone());

        let error = service
            .get_stock_ledger(&january_request())
            .await
            .unwrap_err();
        assert!(matches!(
            error,
            Error::Ledger(LedgerError::ValuationOverflow(_))
        ));
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn stock_on_hand_includes_the_given_day() {
        let service = service(Fixture::january());
        let before = service
            .get_stock_on_hand(ITEM_ID, date(2023, 12, 31))
            .await
            .unwrap();
        assert_eq!(before.quantity, 50);

        let after = service
            .get_stock_on_hand(ITEM_ID, date(2024, 1, 1))
            .await
            .unwrap();
        assert_eq!(after.quantity, 70);
    }

    #[test]
    fn requires_exactly_one_source_per_type() {
        let items: Arc<dyn ItemRepositoryTrait> = Arc::new(MockItemRepository::with_items(&[]));

        let missing = StockLedgerService::new(
            items.clone(),
            vec![
                Arc::new(MockMovementSource::new(MovementType::Purchase)),
                Arc::new(MockMovementSource::new(MovementType::Sale)),
                Arc::new(MockMovementSource::new(MovementType::SaleReturn)),
            ],
        );
        assert!(matches!(
            missing,
            Err(Error::Ledger(LedgerError::SourceMissing(
                MovementType::PurchaseReturn
            )))
        ));

        let mut sources = Fixture::empty().into_sources();
        sources.push(Arc::new(MockMovementSource::new(MovementType::Sale)));
        assert!(matches!(
            StockLedgerService::new(items, sources),
            Err(Error::Ledger(LedgerError::DuplicateSource(MovementType::Sale)))
        ));
    }
}
