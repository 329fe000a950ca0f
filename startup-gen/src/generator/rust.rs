//! Rust startup module and its linker script fragment.
//!
//! Stable Rust has no weak aliases, so every handler is declared in an `unsafe extern "C"`
//! block and the fragment binds it to `Default_Handler` with `PROVIDE`. Defining a
//! `#[unsafe(no_mangle)]` function of the same name takes precedence over the fallback at
//! link time.

use proc_macro2::{Literal, TokenStream};
use quote::{format_ident, quote};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;

use super::casing::interrupt_variant;
use super::layout::OffsetAssertion;
use super::{HandlerName, OutputFile, OutputFormat, StartupBuilder, VectorPlan};
use crate::error::{Error, Result};
use crate::slot::{RESET_SLOT, SLOT_OFFSET};

pub struct RustStartup;

fn handler_ident(handler: HandlerName) -> Result<syn::Ident> {
    let name = handler.to_string();
    syn::parse_str::<syn::Ident>(&name).map_err(|_| Error::InvalidIdentifier {
        name,
        format: OutputFormat::Rust.name(),
    })
}

/// Declared handlers in slot order, each name once.
fn declared_handlers(plan: &VectorPlan) -> Result<Vec<syn::Ident>> {
    let mut seen = BTreeSet::new();
    let mut idents = Vec::new();
    for handler in plan.declarations() {
        if seen.insert(handler.to_string()) {
            idents.push(handler_ident(handler)?);
        }
    }
    Ok(idents)
}

fn vector(handler: Option<HandlerName>) -> Result<TokenStream> {
    match handler {
        Some(handler) => {
            let ident = handler_ident(handler)?;
            Ok(quote!(Some(#ident)))
        },
        None => Ok(quote!(None)),
    }
}

/// Entries for slots 1..=15; slot 0 is the initial stack pointer.
fn core_vectors(plan: &VectorPlan) -> Result<Vec<TokenStream>> {
    (RESET_SLOT..SLOT_OFFSET as u16)
        .map(|slot| {
            if slot == RESET_SLOT {
                return Ok(quote!(Some(Reset_Handler)));
            }
            let handler = plan
                .core
                .iter()
                .find(|v| v.slot.index() == slot)
                .map(|v| v.handler);
            vector(handler)
        })
        .collect()
}

fn interrupt_enum(plan: &VectorPlan) -> Result<TokenStream> {
    let mut variants: BTreeMap<String, &str> = BTreeMap::new();
    let mut definitions = Vec::new();
    for (index, handler) in plan.nvic_entries() {
        let base = match handler {
            HandlerName::Vendor(base) => base,
            _ => continue,
        };
        let variant = interrupt_variant(base).map_err(|_| Error::InvalidIdentifier {
            name: base.to_string(),
            format: OutputFormat::Rust.name(),
        })?;
        match variants.get(&variant.to_string()) {
            // same interrupt name in several slots: the lowest one keeps the variant
            Some(&first) if first == base => continue,
            Some(&first) => {
                return Err(Error::DuplicateVariant {
                    first: first.to_string(),
                    second: base.to_string(),
                    variant: variant.to_string(),
                });
            },
            None => {
                variants.insert(variant.to_string(), base);
            },
        }
        let number = Literal::u16_unsuffixed(index);
        definitions.push(quote!(#variant = #number));
    }
    if definitions.is_empty() {
        return Ok(TokenStream::new());
    }
    Ok(quote! {
        /// NVIC interrupts named by the device header.
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u16)]
        pub enum Interrupt {
            #( #definitions ),*
        }

        impl Interrupt {
            #[inline]
            pub const fn number(self) -> u16 {
                self as u16
            }
        }
    })
}

fn module_tokens(plan: &VectorPlan, handlers: &[syn::Ident]) -> Result<TokenStream> {
    let core_vectors = core_vectors(plan)?;
    let nvic_vectors = plan
        .nvic
        .iter()
        .map(|&h| vector(h))
        .collect::<Result<Vec<_>>>()?;
    let nvic_count = Literal::usize_unsuffixed(plan.nvic.len());
    let layout = OffsetAssertion {
        struct_ident: format_ident!("VectorTable"),
        field_ident: format_ident!("nvic_interrupts"),
        word_offset: SLOT_OFFSET as usize,
    };
    let interrupts = interrupt_enum(plan)?;
    Ok(quote! {
        #![allow(non_snake_case, non_upper_case_globals, dead_code)]

        unsafe extern "C" {
            static _sidata: u32;
            static mut _sdata: u32;
            static mut _edata: u32;
            static mut _sbss: u32;
            static mut _ebss: u32;
            fn _estack();

            #[link_name = "SystemInit"]
            fn system_init();
            #[link_name = "main"]
            fn app_main() -> i32;

            #( fn #handlers(); )*
        }

        /// Entered after core reset.
        #[unsafe(no_mangle)]
        pub extern "C" fn Reset_Handler() {
            unsafe {
                system_init();
                let mut src = core::ptr::addr_of!(_sidata);
                let mut dst = core::ptr::addr_of_mut!(_sdata);
                while dst < core::ptr::addr_of_mut!(_edata) {
                    core::ptr::write_volatile(dst, core::ptr::read(src));
                    dst = dst.add(1);
                    src = src.add(1);
                }
                let mut dst = core::ptr::addr_of_mut!(_sbss);
                while dst < core::ptr::addr_of_mut!(_ebss) {
                    core::ptr::write_volatile(dst, 0);
                    dst = dst.add(1);
                }
                app_main();
            }
            loop {}
        }

        /// Target of every handler the application does not define.
        #[unsafe(no_mangle)]
        pub extern "C" fn Default_Handler() {
            loop {}
        }

        pub type Vector = Option<unsafe extern "C" fn()>;

        #[repr(C)]
        pub struct VectorTable {
            pub initial_sp: unsafe extern "C" fn(),
            pub core_exceptions: [Vector; 15],
            pub nvic_interrupts: [Vector; #nvic_count],
        }

        #layout

        #[unsafe(link_section = ".isr_vector")]
        #[unsafe(no_mangle)]
        pub static g_pfnvectors: VectorTable = VectorTable {
            initial_sp: _estack,
            core_exceptions: [ #( #core_vectors ),* ],
            nvic_interrupts: [ #( #nvic_vectors ),* ],
        };

        #interrupts
    })
}

impl StartupBuilder for RustStartup {
    fn build(&self, plan: &VectorPlan) -> Result<Vec<OutputFile>> {
        let module_name = format!("{}.{}", plan.stem, OutputFormat::Rust.extension());
        let script_name = format!("{}.x", plan.stem);
        let handlers = declared_handlers(plan)?;
        let file: syn::File = syn::parse2(module_tokens(plan, &handlers)?)?;

        let mut module = String::new();
        writeln!(module, "// {}", module_name)?;
        writeln!(module, "// Rust startup module generated by h2startup from {}", plan.source_name)?;
        for note in plan.notes.iter() {
            writeln!(module, "// {}", note)?;
        }
        writeln!(module, "// Link with {}. A #[unsafe(no_mangle)] extern \"C\" fn named like a handler replaces its default.", script_name)?;
        writeln!(module)?;
        module.push_str(&prettyplease::unparse(&file));

        let mut script = String::new();
        writeln!(script, "/* {}: default handler bindings for {} */", script_name, module_name)?;
        for handler in handlers.iter() {
            writeln!(script, "PROVIDE({} = Default_Handler);", handler)?;
        }

        Ok(vec![
            OutputFile {
                file_name: module_name,
                contents: module,
            },
            OutputFile {
                file_name: script_name,
                contents: script,
            },
        ])
    }
}
