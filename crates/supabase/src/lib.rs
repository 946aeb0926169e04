//! PostgREST client for the Supabase backend.
//!
//! Implements the [`VehicleStore`] trait from `pitstop-core` over the
//! project's REST and RPC endpoints using the service-role key.
//!
//! [`VehicleStore`]: pitstop_core::VehicleStore

mod client;
mod store;

pub use client::SupabaseClient;
