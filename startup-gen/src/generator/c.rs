//! gcc-arm C startup module.

use std::fmt::Write;

use super::{HandlerName, OutputFile, OutputFormat, StartupBuilder, VectorPlan};
use crate::error::{Error, Result};
use crate::slot::RESET_SLOT;

/// Column at which the weak alias attribute starts.
const PROTOTYPE_WIDTH: usize = 48;

const STARTUP_CODE: &str = "\
// linker script symbols, only their addresses are meaningful
extern int
   _sdata,  // start of .data in RAM
   _edata,  // end of .data in RAM
   _sidata, // load address of .data in Flash
   _sbss,   // start of .bss
   _ebss,   // end of .bss
   _estack; // initial stack pointer

void SystemInit(void);
void __libc_init_array(void);
int main(void);

// entered after core reset
__attribute__ ((naked, noreturn)) void Reset_Handler(void)
{
   SystemInit();
   // copy .data initial values from Flash
   for (int *dptr = &_sdata, *sptr = &_sidata; dptr < &_edata;)
       *dptr++ = *sptr++;
   // zero .bss
   for (int *dptr = &_sbss; dptr < &_ebss; dptr++)
       *dptr = 0;
   __libc_init_array();
   main();
   for (;;);
}

// target of every handler the application does not define
static void Default_Handler(void)
{
    for (;;);
}

";

const TABLE_START: &str = "
struct vectable_ {
    void *Initial_SP;
    void (*Core_Exceptions[15])(void);
    void (*NVIC_Interrupts[])(void);
};

#define CX(a) [(a) - 1]

const struct vectable_ g_pfnvectors __attribute__((section(\".isr_vector\"))) = {
    .Initial_SP = &_estack,
    .Core_Exceptions = {
";

pub struct CStartup;

/// C identifiers: ASCII letters, digits and `_`, not starting with a digit.
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {},
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn checked(handler: HandlerName) -> Result<String> {
    let name = handler.to_string();
    if is_c_identifier(&name) {
        Ok(name)
    } else {
        Err(Error::InvalidIdentifier {
            name,
            format: OutputFormat::C.name(),
        })
    }
}

fn separator(last: bool) -> &'static str {
    if last { "" } else { "," }
}

impl StartupBuilder for CStartup {
    fn build(&self, plan: &VectorPlan) -> Result<Vec<OutputFile>> {
        let file_name = format!("{}.{}", plan.stem, OutputFormat::C.extension());
        let mut out = String::new();

        writeln!(out, "/*")?;
        writeln!(out, "    {}", file_name)?;
        writeln!(out, "    gcc-arm compatible C startup module generated by h2startup from {}", plan.source_name)?;
        for note in plan.notes.iter() {
            writeln!(out, "    {}", note)?;
        }
        writeln!(out, "*/")?;
        writeln!(out)?;
        out.push_str(STARTUP_CODE);

        for handler in plan.declarations() {
            let prototype = format!("void {}(void)", checked(handler)?);
            writeln!(
                out,
                "{:<width$}__attribute__ ((weak, alias(\"Default_Handler\")));",
                prototype,
                width = PROTOTYPE_WIDTH
            )?;
        }

        out.push_str(TABLE_START);
        write!(out, "        CX({:2}) = Reset_Handler", RESET_SLOT)?;
        for vector in plan.core.iter() {
            write!(out, ",\n        CX({:2}) = {}", vector.slot.index(), checked(vector.handler)?)?;
        }
        writeln!(out)?;
        writeln!(out, "    }},")?;
        writeln!(out, "    .NVIC_Interrupts = {{")?;
        let entries: Vec<_> = plan.nvic_entries().collect();
        let width = plan.index_width();
        for (n, &(index, handler)) in entries.iter().enumerate() {
            writeln!(
                out,
                "        [{:>width$}] = {}{}",
                index,
                checked(handler)?,
                separator(n + 1 == entries.len()),
                width = width
            )?;
        }
        writeln!(out, "    }}")?;
        writeln!(out, "}};")?;

        Ok(vec![OutputFile {
            file_name,
            contents: out,
        }])
    }
}
