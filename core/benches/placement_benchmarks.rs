use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use shopfront::{
  ContextData, MemoryOrderStore, MemoryProductStore, OrderPlacement, Pipeline, PipelineControl, PipelineError,
  PlaceOrder, Product,
};
use std::sync::Arc;
use tokio::runtime::Runtime; // To run async code within Criterion

#[derive(Clone, Debug, Default)]
struct BenchContext {
  counter: u64,
}

// Using PipelineError directly for benchmark simplicity.
type BenchError = PipelineError;

fn create_increment_handler() -> shopfront::Handler<BenchContext, BenchError> {
  Box::new(move |ctx: ContextData<BenchContext>| {
    Box::pin(async move {
      ctx.write().counter += 1;
      Ok(PipelineControl::Continue)
    })
  })
}

fn create_decrement_compensator() -> shopfront::Compensator<BenchContext, BenchError> {
  Box::new(move |ctx: ContextData<BenchContext>| {
    Box::pin(async move {
      ctx.write().counter -= 1;
      Ok(())
    })
  })
}

/// Builds `num_steps` compensable steps, optionally ending in a failing one.
fn build_pipeline(num_steps: usize, fail_last: bool) -> Pipeline<BenchContext, BenchError> {
  let step_defs: Vec<(&str, bool)> = (0..num_steps)
    .map(|i| (Box::leak(format!("step_{}", i).into_boxed_str()) as &'static str, false))
    .collect();
  let mut pipeline = Pipeline::<BenchContext, BenchError>::new(&step_defs);

  for (i, (name, _)) in step_defs.iter().enumerate() {
    if fail_last && i + 1 == num_steps {
      pipeline
        .on(name, |_ctx: ContextData<BenchContext>| async {
          Err::<PipelineControl, BenchError>(PipelineError::Internal("bench failure".to_string()))
        })
        .unwrap();
    } else {
      pipeline.on(name, create_increment_handler()).unwrap();
      pipeline.compensate(name, create_decrement_compensator()).unwrap();
    }
  }
  pipeline
}

fn bench_pipeline_run(c: &mut Criterion) {
  let mut group = c.benchmark_group("PipelineRun");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 5, 10] {
    for fail_last in [false, true] {
      let pipeline = Arc::new(build_pipeline(num_steps, fail_last));
      let label = if fail_last { "compensating" } else { "completing" };

      group.throughput(Throughput::Elements(num_steps as u64));
      group.bench_with_input(BenchmarkId::new(label, num_steps), &num_steps, |b, _| {
        b.to_async(&rt).iter_batched(
          || ContextData::new(BenchContext::default()),
          |ctx| {
            let p_clone = pipeline.clone();
            async move { p_clone.run(ctx).await }
          },
          criterion::BatchSize::SmallInput,
        );
      });
    }
  }
  group.finish();
}

fn bench_order_placement(c: &mut Criterion) {
  let mut group = c.benchmark_group("OrderPlacement");
  let rt = Runtime::new().unwrap();

  // Plenty of stock: every iteration takes the full reserve + record path.
  let stocked = Product::new("Bench Widget", 100, i32::MAX);
  let stocked_id = stocked.id.to_string();
  let products = Arc::new(MemoryProductStore::with_products([stocked]));
  let placement = Arc::new(OrderPlacement::new(products, Arc::new(MemoryOrderStore::new())).unwrap());

  group.bench_function("placed", |b| {
    b.to_async(&rt).iter(|| {
      let placement = placement.clone();
      let request = PlaceOrder::new(stocked_id.clone(), "bench@example.com");
      async move { placement.place(request).await }
    });
  });

  // Sold out: the conditional decrement matches nothing.
  let sold_out = Product::new("Bench Gadget", 100, 0);
  let sold_out_id = sold_out.id.to_string();
  let products = Arc::new(MemoryProductStore::with_products([sold_out]));
  let rejecting = Arc::new(OrderPlacement::new(products, Arc::new(MemoryOrderStore::new())).unwrap());

  group.bench_function("rejected", |b| {
    b.to_async(&rt).iter(|| {
      let placement = rejecting.clone();
      let request = PlaceOrder::new(sold_out_id.clone(), "bench@example.com");
      async move { placement.place(request).await }
    });
  });

  group.finish();
}

criterion_group!(benches, bench_pipeline_run, bench_order_placement);
criterion_main!(benches);
